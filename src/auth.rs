//! Caller credential model: credential kinds, account/user identifiers, and secrets.

pub mod credential;
pub mod id;
pub mod secret;

pub use credential::*;
pub use id::*;
pub use secret::*;
