//! Claim set embedded in service tokens.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	auth::{AuthType, ContextCredentials, CredentialSecret},
	config::TokenPolicy,
	error::SigningError,
};

const JTI_LEN: usize = 24;

/// Credential-specific claims; the downstream verifier branches on which bearer is present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialClaims {
	/// Claims for [`AuthType::IamAccessToken`] credentials.
	IamAccessToken {
		/// The caller's IAM access token.
		iam_access_token: CredentialSecret,
		/// Subject identifier, when supplied.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		user_id: Option<String>,
	},
	/// Claims for [`AuthType::ImsToken`] credentials.
	ImsToken {
		/// The caller's IMS token.
		ims_token: CredentialSecret,
		/// IMS user identifier, when supplied.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		ims_user_id: Option<String>,
	},
}
impl CredentialClaims {
	/// Credential kind these claims were built from.
	pub fn auth_type(&self) -> AuthType {
		match self {
			Self::IamAccessToken { .. } => AuthType::IamAccessToken,
			Self::ImsToken { .. } => AuthType::ImsToken,
		}
	}

	/// Subject identifier regardless of credential kind.
	pub fn user_id(&self) -> Option<&str> {
		match self {
			Self::IamAccessToken { user_id, .. } => user_id.as_deref(),
			Self::ImsToken { ims_user_id, .. } => ims_user_id.as_deref(),
		}
	}
}

/// Full claim set of a service token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTokenClaims {
	/// Issued-at (Unix seconds).
	pub iat: i64,
	/// Expiry (Unix seconds).
	pub exp: i64,
	/// Not-before (Unix seconds); backdated by the configured skew.
	pub nbf: i64,
	/// Random token identifier.
	pub jti: String,
	/// Issuer, when configured.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub iss: Option<String>,
	/// Audience, when configured.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub aud: Option<String>,
	/// Cloud account the caller authenticated against.
	pub account_id: String,
	/// Credential-specific claims.
	#[serde(flatten)]
	pub credential: CredentialClaims,
}
impl ServiceTokenClaims {
	/// Builds the claim set for `credentials` issued at `issued_at`.
	///
	/// Fails when the policy lifetimes push `exp` or `nbf` outside the representable range.
	pub fn new(
		credentials: &ContextCredentials,
		policy: &TokenPolicy,
		issued_at: OffsetDateTime,
	) -> Result<Self, SigningError> {
		let (exp, nbf) = policy.window(issued_at)?;
		let user_id = credentials.user_id.as_ref().map(|id| id.to_string());
		let credential = match credentials.auth_type {
			AuthType::IamAccessToken => CredentialClaims::IamAccessToken {
				iam_access_token: credentials.credential.clone(),
				user_id,
			},
			AuthType::ImsToken =>
				CredentialClaims::ImsToken { ims_token: credentials.credential.clone(), ims_user_id: user_id },
		};

		Ok(Self {
			iat: issued_at.unix_timestamp(),
			exp: exp.unix_timestamp(),
			nbf: nbf.unix_timestamp(),
			jti: random_jti(),
			iss: policy.issuer.clone(),
			aud: policy.audience.clone(),
			account_id: credentials.account_id.to_string(),
			credential,
		})
	}
}

fn random_jti() -> String {
	rand::rng().sample_iter(Alphanumeric).take(JTI_LEN).map(char::from).collect()
}
