//! Common error types shared across crates.

use thiserror::Error;

/// Error kinds produced by the payload codec and the key provider.
///
/// Every variant reflects a static defect in the input, so none of them are
/// retryable. Variants map to process exit codes used by the CLI:
/// - [`SealError::InvalidKeyMaterial`] → 3
/// - payload framing errors ([`SealError::MalformedPayload`],
///   [`SealError::UnsupportedSchemeVersion`], [`SealError::InvalidIvLength`]) → 4
/// - decryption errors ([`SealError::DecryptionFailed`], [`SealError::InvalidUtf8`]) → 5
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SealError {
    /// The payload text is not valid base64, or the envelope is truncated.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The envelope declares a scheme version this build does not understand.
    #[error("unsupported scheme version: {0}")]
    UnsupportedSchemeVersion(u8),

    /// The IV length byte disagrees with what the declared scheme mandates.
    #[error("invalid IV length: {0}")]
    InvalidIvLength(u8),

    /// Cipher padding or block alignment check failed.
    ///
    /// A wrong key, a corrupted payload and a truncated payload are
    /// indistinguishable at this layer.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Decrypted bytes are not valid UTF-8. Almost always a wrong key.
    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8,

    /// Key bytes are missing or wrongly sized, or the passphrase is empty.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),
}

impl SealError {
    /// Returns the process exit status the CLI should use for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            SealError::InvalidKeyMaterial(_) => 3,
            SealError::MalformedPayload(_)
            | SealError::UnsupportedSchemeVersion(_)
            | SealError::InvalidIvLength(_) => 4,
            SealError::DecryptionFailed | SealError::InvalidUtf8 => 5,
        }
    }

    /// Short machine-readable error code (e.g. `"decryption_failed"`).
    pub fn kind(&self) -> &'static str {
        match self {
            SealError::MalformedPayload(_) => "malformed_payload",
            SealError::UnsupportedSchemeVersion(_) => "unsupported_scheme_version",
            SealError::InvalidIvLength(_) => "invalid_iv_length",
            SealError::DecryptionFailed => "decryption_failed",
            SealError::InvalidUtf8 => "invalid_utf8",
            SealError::InvalidKeyMaterial(_) => "invalid_key_material",
        }
    }
}
