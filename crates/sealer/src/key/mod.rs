//! Key provider: turns a base64 key string or a passphrase + salt pair into a
//! [`SymmetricKey`].
//!
//! # Interchangeability
//!
//! Both paths produce plain 32-byte AES-256 keys: a key derived from a
//! passphrase and the same 32 bytes imported as base64 decrypt each other's
//! payloads. The derivation parameters below are part of the compatibility contract:
//! changing any of them makes every payload encrypted under a derived key
//! undecryptable.
//!
//! | parameter  | value        |
//! |------------|--------------|
//! | KDF        | PBKDF2       |
//! | PRF        | HMAC-SHA256  |
//! | iterations | 65 536       |
//! | output     | 32 bytes     |

pub mod material;

pub use material::{SymmetricKey, KEY_LEN};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::SealError;
use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 65_536;

/// Import a standard-base64 encoded 32-byte key.
///
/// The decoded bytes are used as-is; no hashing or stretching is applied.
/// Surrounding whitespace is not stripped here.
///
/// # Errors
///
/// Returns [`SealError::InvalidKeyMaterial`] if `encoded` is not valid base64
/// or does not decode to exactly [`KEY_LEN`] bytes.
pub fn import_key(encoded: &str) -> Result<SymmetricKey, SealError> {
    let raw = Zeroizing::new(
        STANDARD
            .decode(encoded)
            .map_err(|e| SealError::InvalidKeyMaterial(format!("key is not valid base64: {e}")))?,
    );

    let bytes: [u8; KEY_LEN] = raw.as_slice().try_into().map_err(|_| {
        SealError::InvalidKeyMaterial(format!("expected {KEY_LEN} bytes, got {}", raw.len()))
    })?;

    Ok(SymmetricKey::from_array(bytes))
}

/// Derive a key from a passphrase and salt with PBKDF2-HMAC-SHA256.
///
/// Deterministic: the same `(passphrase, salt)` always yields the same key.
/// An empty salt is accepted.
///
/// # Errors
///
/// Returns [`SealError::InvalidKeyMaterial`] if `passphrase` is empty.
pub fn derive_key(passphrase: &str, salt: &str) -> Result<SymmetricKey, SealError> {
    if passphrase.is_empty() {
        return Err(SealError::InvalidKeyMaterial(
            "passphrase must not be empty".into(),
        ));
    }

    let mut out = [0u8; KEY_LEN];
    pbkdf2::<Hmac<Sha256>>(
        passphrase.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ITERATIONS,
        &mut out,
    )
    .map_err(|_| SealError::InvalidKeyMaterial("key derivation failed".into()))?;

    let key = SymmetricKey::from_array(out);
    out.zeroize();
    Ok(key)
}
