//! Infrastructure layer for the AccessGate client
//!
//! Contains the error taxonomy and the trait seams for the four external
//! collaborators: the read-only registry view, the signer-backed registry,
//! the encryption subsystem, and the wallet connector.

mod error;
mod traits;

pub use error::*;
pub use traits::*;
