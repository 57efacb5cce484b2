//! Common types, the envelope wire protocol, and errors shared across `confseal` crates.

pub mod error;
pub mod protocol;

pub use error::SealError;
pub use protocol::{Envelope, EnvelopeInfo};
