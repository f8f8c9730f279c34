//! Signing material: key identifiers, algorithms, and RSA private keys.

pub mod kid;
pub mod signing;

pub use kid::*;
pub use signing::*;
