//! AES-256-CBC payload encryption primitives.
//!
//! This module is intentionally free of I/O and logging. It provides the
//! encode/decode operations used by every front-end.
//!
//! # Payload format
//!
//! ```text
//! base64( 0x01 | 0x10 | iv[16] | ciphertext )
//! ```
//!
//! The leading version byte enables future algorithm migration without
//! breaking existing payloads; see [`common::protocol`].

pub mod cipher;

pub use cipher::{decode, encode};
