//! AES-256-CBC encryption and decryption of whole configuration payloads.
//!
//! **Algorithm choice:** AES-256 in CBC mode with PKCS#7 padding, a fresh
//! random 128-bit IV per call. This is fixed by the scheme-1 envelope and must
//! not change without bumping [`common::protocol::SCHEME_VERSION`].
//!
//! **No integrity protection.** CBC without a MAC cannot detect every
//! corruption: a damaged payload may occasionally pass the padding and UTF-8
//! checks and decrypt to garbage.

use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use common::protocol::{Envelope, IV_LEN};
use common::SealError;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::key::SymmetricKey;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Encrypt `plaintext` and return it as payload text.
///
/// A random IV is generated per call via the OS CSPRNG, so encrypting the same
/// text twice yields different payloads.
///
/// # Panics
///
/// Panics if the OS random source is unavailable.
pub fn encode(key: &SymmetricKey, plaintext: &str) -> String {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), (&iv).into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    Envelope::new(iv, ciphertext).to_payload_text()
}

/// Decrypt payload text produced by [`encode`].
///
/// # Errors
///
/// - [`SealError::MalformedPayload`], [`SealError::UnsupportedSchemeVersion`] or
///   [`SealError::InvalidIvLength`] if the envelope cannot be parsed.
/// - [`SealError::DecryptionFailed`] if the ciphertext is empty, not block
///   aligned, or carries invalid padding.
/// - [`SealError::InvalidUtf8`] if the decrypted bytes are not UTF-8.
pub fn decode(key: &SymmetricKey, payload: &str) -> Result<String, SealError> {
    let envelope = Envelope::from_payload_text(payload)?;

    let plaintext = Aes256CbcDec::new(key.as_bytes().into(), (&envelope.iv).into())
        .decrypt_padded_vec_mut::<Pkcs7>(&envelope.ciphertext)
        .map_err(|_| SealError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|e| {
        e.into_bytes().zeroize();
        SealError::InvalidUtf8
    })
}
