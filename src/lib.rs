//! Short-lived service tokens for downstream cloud control planes: credential-aware
//! key-identifier policy, RS-signed JWS issuance, and hot-swappable signing keys.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod generator;
pub mod key;
pub mod obs;
pub mod token;

#[cfg(test)] mod testutil;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		path::{Path, PathBuf},
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};

	pub use crate::error::{Error, Result};
}

pub use jsonwebtoken;

pub use auth::{AccountId, AuthType, ContextCredentials, CredentialSecret, UserId};
pub use config::SignerConfig;
pub use error::{Error, Result};
pub use generator::TokenGenerator;
pub use key::{KeyIdentifier, SigningAlgorithm, SigningKey};
pub use obs::LogContext;
pub use token::SignedToken;
