//! Service token issuance.
//!
//! [`TokenGenerator`] owns the late-bound signer configuration (key identifier, signing
//! key, lifetime policy) as an immutable [`SignerSnapshot`] behind an atomic pointer.
//! Each issuance loads the snapshot exactly once, so a concurrent rotation is observed
//! either entirely or not at all, and readers never take a lock. Writers serialize
//! among themselves and publish a fresh snapshot.
//!
//! Issuance applies, in order:
//!
//! 1. An empty key identifier is rejected for every credential kind.
//! 2. IAM access tokens reject the `sample_key` placeholder identifier; IMS tokens skip this
//!    check entirely.
//! 3. A missing signing key is rejected for every credential kind.
//! 4. The claim set is signed with the installed key and the identifier is stamped into the
//!    JWS `kid` header.

// crates.io
use arc_swap::ArcSwap;
use jsonwebtoken::Header;
// self
use crate::{
	_prelude::*,
	auth::{AuthType, ContextCredentials},
	config::{self, SignerConfig, TokenPolicy},
	error::{KeyError, KeyIdentifierRejection, SigningError},
	key::{Jwk, KeyIdentifier, SigningKey},
	obs::{self, IssueOutcome, IssueSpan, LogContext},
	token::{ServiceTokenClaims, SignedToken},
};

/// Immutable signer configuration read by a single issuance.
#[derive(Clone, Debug)]
pub struct SignerSnapshot {
	/// Label stamped into the `kid` header.
	pub key_identifier: KeyIdentifier,
	/// Installed private key, if provisioned.
	pub signing_key: Option<Arc<SigningKey>>,
	/// Lifetime and addressing policy.
	pub policy: TokenPolicy,
}
impl SignerSnapshot {
	/// Issues a token as of `issued_at` without touching any shared state.
	///
	/// Sub-second precision is dropped so the returned instants match the embedded claims.
	pub fn issue_at(
		&self,
		credentials: &ContextCredentials,
		issued_at: OffsetDateTime,
	) -> Result<SignedToken> {
		self.check_key_identifier(credentials.auth_type)?;

		let signing_key = self.signing_key.as_deref().ok_or(Error::SigningKeyUnavailable)?;
		let issued_at = issued_at - Duration::nanoseconds(i64::from(issued_at.nanosecond()));
		let (expires_at, _) = self.policy.window(issued_at)?;
		let claims = ServiceTokenClaims::new(credentials, &self.policy, issued_at)?;
		let mut header = Header::new(self.policy.algorithm.to_jwt_algorithm());

		header.kid = Some(self.key_identifier.to_string());

		let value = jsonwebtoken::encode(&header, &claims, signing_key.encoding_key())
			.map_err(SigningError::from)?;

		Ok(SignedToken::new(
			value,
			self.key_identifier.clone(),
			self.policy.algorithm,
			issued_at,
			expires_at,
		))
	}

	/// Applies the key-identifier policy for `auth_type`.
	pub fn check_key_identifier(&self, auth_type: AuthType) -> Result<()> {
		if self.key_identifier.is_empty() {
			return Err(Error::InvalidKeyIdentifier { reason: KeyIdentifierRejection::Empty });
		}
		if auth_type.validates_key_identifier() && self.key_identifier.is_sentinel() {
			return Err(Error::InvalidKeyIdentifier { reason: KeyIdentifierRejection::Sentinel });
		}

		Ok(())
	}
}

/// Issues short-lived signed service tokens for authenticated callers.
///
/// Safe to share across threads; see the module docs for the snapshot model.
pub struct TokenGenerator {
	snapshot: ArcSwap<SignerSnapshot>,
	key_dir: Option<PathBuf>,
	writer: Mutex<()>,
}
impl TokenGenerator {
	/// Creates a generator with the default policy and no signing key.
	pub fn new(key_identifier: impl Into<KeyIdentifier>) -> Self {
		Self::with_policy(key_identifier, TokenPolicy::default())
	}

	/// Creates a generator with an explicit policy and no signing key.
	pub fn with_policy(key_identifier: impl Into<KeyIdentifier>, policy: TokenPolicy) -> Self {
		let snapshot =
			SignerSnapshot { key_identifier: key_identifier.into(), signing_key: None, policy };

		Self { snapshot: ArcSwap::from_pointee(snapshot), key_dir: None, writer: Mutex::new(()) }
	}

	/// Builds a generator from configuration.
	///
	/// When a key directory is configured and `<key_dir>/<key_identifier>` exists, it is
	/// loaded as the signing key. A missing file leaves the key unset so it can be
	/// provisioned later; an unreadable or malformed file is an error. Identifiers that are
	/// not a plain file name (including the empty identifier) skip loading and are left to
	/// the issuance-time policy.
	pub fn from_config(config: &SignerConfig) -> Result<Self> {
		let policy = config.validate()?;
		let mut generator = Self::with_policy(config.key_identifier.clone(), policy);

		generator.key_dir = config.key_dir.clone();

		if let Some(path) = config.key_path() {
			match SigningKey::from_pem_file(&path) {
				Ok(key) => generator.install_signing_key(key),
				Err(KeyError::Read { source, .. })
					if source.kind() == std::io::ErrorKind::NotFound => {},
				Err(e) => return Err(e.into()),
			}
		}

		Ok(generator)
	}

	/// Installs `key` and returns the generator.
	pub fn with_signing_key(self, key: SigningKey) -> Self {
		self.install_signing_key(key);

		self
	}

	/// Returns the snapshot the next issuance would observe.
	pub fn snapshot(&self) -> Arc<SignerSnapshot> {
		self.snapshot.load_full()
	}

	/// Currently configured key identifier.
	pub fn key_identifier(&self) -> KeyIdentifier {
		self.snapshot.load().key_identifier.clone()
	}

	/// Returns `true` if a signing key is installed.
	pub fn has_signing_key(&self) -> bool {
		self.snapshot.load().signing_key.is_some()
	}

	/// Public JWK for the installed key, addressed by the current identifier.
	pub fn public_jwk(&self) -> Option<Jwk> {
		let snapshot = self.snapshot.load();

		snapshot
			.signing_key
			.as_ref()
			.map(|key| key.public_jwk(&snapshot.key_identifier, snapshot.policy.algorithm))
	}

	/// Replaces the key identifier, keeping the installed key.
	pub fn set_key_identifier(&self, key_identifier: impl Into<KeyIdentifier>) {
		let key_identifier = key_identifier.into();

		self.update(|current| SignerSnapshot { key_identifier, ..current.clone() });
	}

	/// Installs (or replaces) the signing key, keeping the identifier.
	pub fn install_signing_key(&self, key: SigningKey) {
		let key = Arc::new(key);

		self.update(|current| {
			obs::emit_key_installed(&current.key_identifier, key.thumbprint());

			SignerSnapshot { signing_key: Some(key), ..current.clone() }
		});
	}

	/// Removes the signing key; subsequent issuance fails until a key is installed.
	pub fn clear_signing_key(&self) {
		self.update(|current| SignerSnapshot { signing_key: None, ..current.clone() });
	}

	/// Swaps identifier and key together so no issuance observes a mismatched pair.
	pub fn rotate(&self, key_identifier: impl Into<KeyIdentifier>, key: SigningKey) {
		let key_identifier = key_identifier.into();
		let key = Arc::new(key);

		self.update(|current| {
			obs::emit_key_installed(&key_identifier, key.thumbprint());

			SignerSnapshot { key_identifier, signing_key: Some(key), policy: current.policy.clone() }
		});
	}

	/// Reloads `<key_dir>/<key_identifier>` from disk.
	///
	/// Returns `Ok(false)` when no key directory is configured or the identifier does not
	/// name a file inside it. The writer lock is held from reading the identifier until the
	/// new key is published, so a concurrent [`rotate`](Self::rotate) cannot be paired with
	/// the file of the previous identifier.
	pub fn reload_signing_key(&self) -> Result<bool> {
		let Some(dir) = self.key_dir.as_deref() else {
			return Ok(false);
		};
		let _writer = self.writer.lock();
		let current = self.snapshot.load_full();
		let Some(path) = config::key_file_path(dir, &current.key_identifier) else {
			return Ok(false);
		};
		let key = Arc::new(SigningKey::from_pem_file(path)?);

		obs::emit_key_installed(&current.key_identifier, key.thumbprint());

		let next = SignerSnapshot { signing_key: Some(key), ..(*current).clone() };

		self.snapshot.store(Arc::new(next));

		Ok(true)
	}

	/// Issues a service token for `credentials`.
	///
	/// Exactly one of a signed token or an error is returned; no partial or unsigned token
	/// is ever produced. `ctx` is used for diagnostics only.
	pub fn issue_service_token(
		&self,
		credentials: &ContextCredentials,
		ctx: &LogContext,
	) -> Result<SignedToken> {
		let auth_type = credentials.auth_type;
		let _span = IssueSpan::new(auth_type, ctx).entered();

		obs::record_issue_outcome(auth_type, IssueOutcome::Attempt);

		let snapshot = self.snapshot.load();
		let result = snapshot.issue_at(credentials, OffsetDateTime::now_utc());

		match &result {
			Ok(token) => {
				if let Some(key) = snapshot.signing_key.as_deref() {
					obs::emit_issued(&token.key_identifier, key.thumbprint());
				}

				obs::record_issue_outcome(auth_type, IssueOutcome::Success);
			},
			Err(e) => {
				obs::emit_rejection(auth_type, e);
				obs::record_issue_outcome(auth_type, IssueOutcome::Failure);
			},
		}

		result
	}

	fn update(&self, f: impl FnOnce(&SignerSnapshot) -> SignerSnapshot) {
		let _writer = self.writer.lock();
		let next = f(&self.snapshot.load());

		self.snapshot.store(Arc::new(next));
	}
}
impl Debug for TokenGenerator {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let snapshot = self.snapshot.load();

		f.debug_struct("TokenGenerator")
			.field("key_identifier", &snapshot.key_identifier)
			.field("signing_key_set", &snapshot.signing_key.is_some())
			.field("policy", &snapshot.policy)
			.field("key_dir", &self.key_dir)
			.finish()
	}
}
