//! Encrypt small configuration secrets into versioned, base64 payloads.
//!
//! ```no_run
//! let key = sealer::derive_key("aquickredfox", "some-salt")?;
//! let payload = sealer::encode(&key, "SSL_KEYSTORE_PASSWORD=keypass1234");
//! assert_eq!(sealer::decode(&key, &payload)?, "SSL_KEYSTORE_PASSWORD=keypass1234");
//! # Ok::<(), sealer::SealError>(())
//! ```
//!
//! Every function is synchronous and stateless; keys can be shared across
//! threads by reference.

pub mod crypto;
pub mod key;

pub use common::SealError;
pub use crypto::{decode, encode};
pub use key::{derive_key, import_key, SymmetricKey};
