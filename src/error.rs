//! Signer-level error types shared across issuance, key loading, and configuration.

// self
use crate::_prelude::*;

/// Signer-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical signer error exposed by public APIs.
///
/// Issuance only ever yields [`Error::InvalidKeyIdentifier`], [`Error::SigningKeyUnavailable`],
/// or [`Error::Signing`]. The remaining variants surface from construction and
/// provisioning paths.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Configured key identifier cannot be used for this credential type.
	#[error("Key identifier is invalid: {reason}.")]
	InvalidKeyIdentifier {
		/// Which policy rule rejected the identifier.
		reason: KeyIdentifierRejection,
	},
	/// No private key is currently installed.
	#[error("Signing key is not available.")]
	SigningKeyUnavailable,
	/// Cryptographic signing failed.
	#[error(transparent)]
	Signing(#[from] SigningError),

	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Key material could not be loaded or parsed.
	#[error(transparent)]
	Key(#[from] KeyError),
}
impl Error {
	/// Returns `true` when the error is one of the issuance policy/signing failures.
	pub fn is_issuance_failure(&self) -> bool {
		matches!(
			self,
			Self::InvalidKeyIdentifier { .. } | Self::SigningKeyUnavailable | Self::Signing(_)
		)
	}
}

/// Policy rule that rejected a key identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyIdentifierRejection {
	/// The identifier is empty.
	Empty,
	/// The identifier equals the `sample_key` placeholder.
	Sentinel,
}
impl KeyIdentifierRejection {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Empty => "empty",
			Self::Sentinel => "sentinel",
		}
	}
}
impl Display for KeyIdentifierRejection {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Empty => f.write_str("identifier is empty"),
			Self::Sentinel =>
				f.write_str("placeholder identifier is not allowed for IAM access tokens"),
		}
	}
}

/// Failure raised by the signing primitive.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Claims could not be serialized or signed with the installed key.
	#[error("Service token could not be signed.")]
	Jws {
		/// Underlying JWS failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Issued-at shifted by the policy lifetimes leaves the representable time range.
	#[error("Token lifetime does not fit in the representable time range.")]
	LifetimeOutOfRange,
}
impl From<jsonwebtoken::errors::Error> for SigningError {
	fn from(e: jsonwebtoken::errors::Error) -> Self {
		Self::Jws { source: e }
	}
}

/// Key loading and parsing failures.
#[derive(Debug, ThisError)]
pub enum KeyError {
	/// Key file could not be read.
	#[error("Signing key file `{}` could not be read.", path.display())]
	Read {
		/// File that failed to load.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// PEM payload is not an RSA private key in PKCS#8 or PKCS#1 form.
	#[error("PEM payload is not a supported RSA private key.")]
	InvalidPem {
		/// Underlying PKCS#8 parsing failure.
		#[source]
		source: rsa::pkcs8::Error,
	},
	/// RSA modulus is below the supported minimum.
	#[error("RSA key has {bits} bits; at least {min} are required.")]
	TooSmall {
		/// Modulus size of the rejected key.
		bits: usize,
		/// Minimum accepted modulus size.
		min: usize,
	},
	/// The signing backend refused the key.
	#[error("Signing backend rejected the key.")]
	Backend {
		/// Underlying JWS library failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
}

/// Configuration and validation failures raised by the signer.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configuration document could not be parsed.
	#[error("Signer configuration is malformed at `{path}`.")]
	Parse {
		/// Dotted path to the offending field.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Token lifetime must be positive.
	#[error("The token TTL must be positive.")]
	NonPositiveTtl,
	/// Token lifetime exceeds the supported maximum.
	#[error("The token TTL of {secs}s exceeds the maximum of {max}s.")]
	TtlTooLong {
		/// Rejected lifetime in seconds.
		secs: i64,
		/// Largest accepted lifetime in seconds.
		max: i64,
	},
	/// Not-before skew cannot be negative.
	#[error("The not-before skew cannot be negative.")]
	NegativeNotBeforeSkew,
	/// Not-before skew exceeds the supported maximum.
	#[error("The not-before skew of {secs}s exceeds the maximum of {max}s.")]
	NotBeforeSkewTooLarge {
		/// Rejected skew in seconds.
		secs: i64,
		/// Largest accepted skew in seconds.
		max: i64,
	},
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Parse { path, source: e.into_inner() }
	}
}
