//! Signer configuration: key identifier, key location, and token lifetime policy.
//!
//! [`SignerConfig`] is the serde-facing document (JSON, durations in whole seconds).
//! [`SignerConfig::validate`] turns it into the [`TokenPolicy`] consulted on every
//! issuance.

// std
use std::path::Component;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, SigningError},
	key::{KeyIdentifier, SigningAlgorithm},
};

const DEFAULT_TOKEN_TTL_SECS: i64 = 155 * 60;
const DEFAULT_NOT_BEFORE_SKEW_SECS: i64 = 5 * 60;

/// Longest accepted token lifetime (7 days).
pub const MAX_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;
/// Largest accepted `nbf` backdating window (1 day).
pub const MAX_NOT_BEFORE_SKEW_SECS: i64 = 24 * 60 * 60;

/// Validated lifetime and addressing policy applied to every issued token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPolicy {
	/// Signature algorithm advertised in the JWS header.
	pub algorithm: SigningAlgorithm,
	/// Token lifetime measured from the issued-at instant.
	pub ttl: Duration,
	/// How far `nbf` is backdated to tolerate verifier clock drift.
	pub not_before_skew: Duration,
	/// Optional `iss` claim.
	pub issuer: Option<String>,
	/// Optional `aud` claim.
	pub audience: Option<String>,
}
impl Default for TokenPolicy {
	fn default() -> Self {
		Self {
			algorithm: SigningAlgorithm::default(),
			ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
			not_before_skew: Duration::seconds(DEFAULT_NOT_BEFORE_SKEW_SECS),
			issuer: None,
			audience: None,
		}
	}
}
impl TokenPolicy {
	/// Returns the `(exp, nbf)` instants for a token issued at `issued_at`.
	pub fn window(
		&self,
		issued_at: OffsetDateTime,
	) -> Result<(OffsetDateTime, OffsetDateTime), SigningError> {
		let expires_at =
			issued_at.checked_add(self.ttl).ok_or(SigningError::LifetimeOutOfRange)?;
		let not_before = issued_at
			.checked_sub(self.not_before_skew)
			.ok_or(SigningError::LifetimeOutOfRange)?;

		Ok((expires_at, not_before))
	}
}

/// Serializable signer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignerConfig {
	/// Label of the public key the downstream verifier should use.
	pub key_identifier: KeyIdentifier,
	/// Signature algorithm.
	#[serde(default)]
	pub algorithm: SigningAlgorithm,
	/// Token lifetime in seconds.
	#[serde(default = "default_token_ttl_secs")]
	pub token_ttl_secs: i64,
	/// `nbf` backdating in seconds.
	#[serde(default = "default_not_before_skew_secs")]
	pub not_before_skew_secs: i64,
	/// Optional `iss` claim.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub issuer: Option<String>,
	/// Optional `aud` claim.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub audience: Option<String>,
	/// Directory holding `<key_identifier>` PEM files.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub key_dir: Option<PathBuf>,
}
impl SignerConfig {
	/// Returns a builder seeded with the provided key identifier.
	pub fn builder(key_identifier: impl Into<KeyIdentifier>) -> SignerConfigBuilder {
		SignerConfigBuilder::new(key_identifier.into())
	}

	/// Parses a JSON document, reporting the path of the first offending field.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(json);

		Ok(serde_path_to_error::deserialize(de)?)
	}

	/// Validates lifetimes and produces the issuance policy.
	pub fn validate(&self) -> Result<TokenPolicy, ConfigError> {
		if self.token_ttl_secs <= 0 {
			return Err(ConfigError::NonPositiveTtl);
		}
		if self.token_ttl_secs > MAX_TOKEN_TTL_SECS {
			return Err(ConfigError::TtlTooLong {
				secs: self.token_ttl_secs,
				max: MAX_TOKEN_TTL_SECS,
			});
		}
		if self.not_before_skew_secs < 0 {
			return Err(ConfigError::NegativeNotBeforeSkew);
		}
		if self.not_before_skew_secs > MAX_NOT_BEFORE_SKEW_SECS {
			return Err(ConfigError::NotBeforeSkewTooLarge {
				secs: self.not_before_skew_secs,
				max: MAX_NOT_BEFORE_SKEW_SECS,
			});
		}

		Ok(TokenPolicy {
			algorithm: self.algorithm,
			ttl: Duration::seconds(self.token_ttl_secs),
			not_before_skew: Duration::seconds(self.not_before_skew_secs),
			issuer: self.issuer.clone(),
			audience: self.audience.clone(),
		})
	}

	/// Location of the PEM file for the configured key identifier.
	///
	/// `None` when no directory is set or when the identifier is not a plain file name
	/// (empty, or containing separators or `.`/`..`), so a key is never read from outside
	/// `key_dir`.
	pub fn key_path(&self) -> Option<PathBuf> {
		key_file_path(self.key_dir.as_deref()?, &self.key_identifier)
	}
}

/// Joins `key_identifier` onto `dir` when it names a single file inside it.
pub(crate) fn key_file_path(dir: &Path, key_identifier: &KeyIdentifier) -> Option<PathBuf> {
	let name = key_identifier.as_str();
	let mut components = Path::new(name).components();

	match (components.next(), components.next()) {
		(Some(Component::Normal(file)), None) if file == name => Some(dir.join(file)),
		_ => None,
	}
}

/// Builder for [`SignerConfig`].
#[derive(Clone, Debug)]
pub struct SignerConfigBuilder {
	config: SignerConfig,
}
impl SignerConfigBuilder {
	fn new(key_identifier: KeyIdentifier) -> Self {
		Self {
			config: SignerConfig {
				key_identifier,
				algorithm: SigningAlgorithm::default(),
				token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
				not_before_skew_secs: DEFAULT_NOT_BEFORE_SKEW_SECS,
				issuer: None,
				audience: None,
				key_dir: None,
			},
		}
	}

	/// Sets the signature algorithm.
	pub fn algorithm(mut self, algorithm: SigningAlgorithm) -> Self {
		self.config.algorithm = algorithm;

		self
	}

	/// Sets the token lifetime.
	pub fn token_ttl(mut self, ttl: Duration) -> Self {
		self.config.token_ttl_secs = ttl.whole_seconds();

		self
	}

	/// Sets the `nbf` backdating window.
	pub fn not_before_skew(mut self, skew: Duration) -> Self {
		self.config.not_before_skew_secs = skew.whole_seconds();

		self
	}

	/// Sets the `iss` claim.
	pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
		self.config.issuer = Some(issuer.into());

		self
	}

	/// Sets the `aud` claim.
	pub fn audience(mut self, audience: impl Into<String>) -> Self {
		self.config.audience = Some(audience.into());

		self
	}

	/// Sets the directory holding key PEM files.
	pub fn key_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.config.key_dir = Some(dir.into());

		self
	}

	/// Validates and returns the configuration.
	pub fn build(self) -> Result<SignerConfig, ConfigError> {
		self.config.validate()?;

		Ok(self.config)
	}
}

fn default_token_ttl_secs() -> i64 {
	DEFAULT_TOKEN_TTL_SECS
}

fn default_not_before_skew_secs() -> i64 {
	DEFAULT_NOT_BEFORE_SKEW_SECS
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn json_defaults_match_builder_defaults() {
		let parsed = SignerConfig::from_json_str(r#"{"key_identifier":"no_sample_key"}"#)
			.expect("Minimal config should parse.");
		let built = SignerConfig::builder("no_sample_key").build().expect("Builder should succeed.");

		assert_eq!(parsed, built);
		assert_eq!(parsed.validate().expect("Defaults should validate."), TokenPolicy::default());
		assert!(parsed.key_path().is_none());
	}

	#[test]
	fn parse_errors_name_the_field() {
		let err = SignerConfig::from_json_str(
			r#"{"key_identifier":"kid","algorithm":"HS256"}"#,
		)
		.expect_err("Symmetric algorithms must be rejected.");

		assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == "algorithm"));

		let err = SignerConfig::from_json_str(r#"{"key_identifier":"kid","ttl":60}"#)
			.expect_err("Unknown fields must be rejected.");

		assert!(matches!(err, ConfigError::Parse { .. }));
	}

	#[test]
	fn lifetimes_are_validated() {
		assert!(matches!(
			SignerConfig::builder("kid").token_ttl(Duration::ZERO).build(),
			Err(ConfigError::NonPositiveTtl)
		));
		assert!(matches!(
			SignerConfig::builder("kid").not_before_skew(Duration::seconds(-1)).build(),
			Err(ConfigError::NegativeNotBeforeSkew)
		));
	}

	#[test]
	fn oversized_lifetimes_are_rejected() {
		let config = SignerConfig::from_json_str(
			r#"{"key_identifier":"kid","token_ttl_secs":9223372036854775807}"#,
		)
		.expect("Config should parse.");

		assert!(matches!(
			config.validate(),
			Err(ConfigError::TtlTooLong { secs: i64::MAX, max: MAX_TOKEN_TTL_SECS })
		));
		assert!(matches!(
			SignerConfig::builder("kid").not_before_skew(Duration::days(2)).build(),
			Err(ConfigError::NotBeforeSkewTooLarge { max: MAX_NOT_BEFORE_SKEW_SECS, .. })
		));
		assert!(
			SignerConfig::builder("kid")
				.token_ttl(Duration::seconds(MAX_TOKEN_TTL_SECS))
				.build()
				.is_ok()
		);
	}

	#[test]
	fn key_path_is_confined_to_the_directory() {
		for kid in ["", "../escape", "/etc/passwd", "nested/kid", ".", "..", "kid/", "./kid"] {
			let config = SignerConfig::builder(kid)
				.key_dir("/etc/signer/keys")
				.build()
				.expect("Config should build.");

			assert_eq!(config.key_path(), None, "kid={kid:?}.");
		}
	}

	#[test]
	fn key_path_joins_identifier_onto_directory() {
		let config = SignerConfig::builder("vpc-block-kid")
			.key_dir("/etc/signer/keys")
			.algorithm(SigningAlgorithm::Rs384)
			.issuer("block-provider")
			.audience("vpc-control-plane")
			.build()
			.expect("Config should build.");
		let policy = config.validate().expect("Config should validate.");

		assert_eq!(config.key_path(), Some(PathBuf::from("/etc/signer/keys/vpc-block-kid")));
		assert_eq!(policy.algorithm, SigningAlgorithm::Rs384);
		assert_eq!(policy.audience.as_deref(), Some("vpc-control-plane"));
	}
}
