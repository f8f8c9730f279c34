//! Issued artifacts: the claim set embedded in service tokens and the signed result.

pub mod claims;
pub mod signed;

pub use claims::*;
pub use signed::*;
