//! Envelope wire format exchanged between every producer and consumer of
//! encrypted configuration payloads.
//!
//! ```text
//! offset  len  field
//! 0       1    scheme version (always 1)
//! 1       1    IV length (always 16 for scheme 1)
//! 2       16   IV bytes
//! 18      ..   ciphertext (AES-256-CBC, PKCS#7 padded)
//! ```
//!
//! The whole byte sequence is carried as standard, padded base64 ("payload
//! text"). This module only frames bytes; the cipher lives in the `sealer` crate.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::SealError;

/// The only envelope layout this build reads or writes.
pub const SCHEME_VERSION: u8 = 1;

/// Byte length of the CBC initialisation vector mandated by scheme 1.
pub const IV_LEN: usize = 16;

/// Version byte + IV length byte + IV.
pub const HEADER_LEN: usize = 2 + IV_LEN;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// A parsed scheme-1 envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Per-message random IV.
    pub iv: [u8; IV_LEN],
    /// Raw cipher output. Not validated here; may be empty or misaligned.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Construct an envelope from an IV and ciphertext.
    pub fn new(iv: [u8; IV_LEN], ciphertext: Vec<u8>) -> Self {
        Self { iv, ciphertext }
    }

    /// Serialise to the byte-exact wire layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(HEADER_LEN + self.ciphertext.len());
        buf.put_u8(SCHEME_VERSION);
        buf.put_u8(IV_LEN as u8);
        buf.put_slice(&self.iv);
        buf.put_slice(&self.ciphertext);
        buf.to_vec()
    }

    /// Parse the wire layout.
    ///
    /// The version byte is checked before the IV length, and both before the
    /// buffer length, so a future scheme is reported as unsupported rather
    /// than truncated.
    ///
    /// # Errors
    ///
    /// - [`SealError::UnsupportedSchemeVersion`] if byte 0 is not [`SCHEME_VERSION`].
    /// - [`SealError::InvalidIvLength`] if byte 1 is not [`IV_LEN`].
    /// - [`SealError::MalformedPayload`] if the buffer ends inside the header.
    pub fn from_bytes(mut raw: &[u8]) -> Result<Self, SealError> {
        if !raw.has_remaining() {
            return Err(SealError::MalformedPayload("empty envelope".into()));
        }
        let version = raw.get_u8();
        if version != SCHEME_VERSION {
            return Err(SealError::UnsupportedSchemeVersion(version));
        }

        if !raw.has_remaining() {
            return Err(SealError::MalformedPayload("missing IV length byte".into()));
        }
        let iv_len = raw.get_u8();
        if usize::from(iv_len) != IV_LEN {
            return Err(SealError::InvalidIvLength(iv_len));
        }

        if raw.remaining() < IV_LEN {
            return Err(SealError::MalformedPayload(format!(
                "expected {IV_LEN} IV bytes, found {}",
                raw.remaining()
            )));
        }
        let mut iv = [0u8; IV_LEN];
        raw.copy_to_slice(&mut iv);

        Ok(Self {
            iv,
            ciphertext: raw.to_vec(),
        })
    }

    /// Encode as payload text (standard base64 with padding).
    pub fn to_payload_text(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Decode payload text and parse the envelope inside it.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::MalformedPayload`] if `text` is not valid base64,
    /// otherwise any error from [`Envelope::from_bytes`].
    pub fn from_payload_text(text: &str) -> Result<Self, SealError> {
        let raw = STANDARD
            .decode(text)
            .map_err(|e| SealError::MalformedPayload(format!("invalid base64: {e}")))?;
        Self::from_bytes(&raw)
    }

    /// Header summary, safe to print: contains no IV or ciphertext bytes.
    pub fn info(&self) -> EnvelopeInfo {
        EnvelopeInfo {
            version: SCHEME_VERSION,
            iv_len: IV_LEN as u8,
            ciphertext_len: self.ciphertext.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

/// Output of `confseal inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeInfo {
    /// Scheme version byte.
    pub version: u8,
    /// Declared IV length.
    pub iv_len: u8,
    /// Number of ciphertext bytes following the header.
    pub ciphertext_len: usize,
}
