//! Credential kinds and the caller credential bundle handed to the signer.

// self
use crate::{
	_prelude::*,
	auth::{AccountId, CredentialSecret, UserId},
};

/// Upstream credential kinds the signer accepts.
///
/// The set is closed; each kind carries its own key-identifier policy (see
/// [`AuthType::validates_key_identifier`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthType {
	/// IAM access token issued by the cloud identity service.
	#[serde(rename = "IAM_ACCESS_TOKEN")]
	IamAccessToken,
	/// Token minted by the infrastructure management service.
	#[serde(rename = "IMS_TOKEN")]
	ImsToken,
}
impl AuthType {
	/// Returns the upstream wire tag.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::IamAccessToken => "IAM_ACCESS_TOKEN",
			Self::ImsToken => "IMS_TOKEN",
		}
	}

	/// Whether issuance for this kind rejects the `sample_key` placeholder identifier.
	///
	/// IMS flows authenticate downstream through a path that does not depend on the
	/// configured key label, so only IAM access tokens are checked.
	pub const fn validates_key_identifier(self) -> bool {
		matches!(self, Self::IamAccessToken)
	}
}
impl Display for AuthType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for AuthType {
	type Err = UnknownAuthType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"IAM_ACCESS_TOKEN" => Ok(Self::IamAccessToken),
			"IMS_TOKEN" => Ok(Self::ImsToken),
			other => Err(UnknownAuthType { value: other.to_owned() }),
		}
	}
}

/// Error returned when parsing an unrecognized credential tag.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown auth type `{value}`.")]
pub struct UnknownAuthType {
	/// The tag that failed to parse.
	pub value: String,
}

/// Authenticated caller credentials as produced by the credential-acquisition layer.
///
/// The signer trusts these values; it never re-verifies `credential` with the identity
/// provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextCredentials {
	/// Credential kind.
	pub auth_type: AuthType,
	/// Opaque bearer value obtained from the identity provider.
	pub credential: CredentialSecret,
	/// Cloud account the credential belongs to.
	pub account_id: AccountId,
	/// Subject identifier, when the upstream flow supplied one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<UserId>,
}
impl ContextCredentials {
	/// Creates credentials without a user identifier.
	pub fn new(auth_type: AuthType, credential: impl Into<String>, account_id: AccountId) -> Self {
		Self { auth_type, credential: CredentialSecret::new(credential), account_id, user_id: None }
	}

	/// Shorthand for [`AuthType::IamAccessToken`] credentials.
	pub fn iam_access_token(credential: impl Into<String>, account_id: AccountId) -> Self {
		Self::new(AuthType::IamAccessToken, credential, account_id)
	}

	/// Shorthand for [`AuthType::ImsToken`] credentials.
	pub fn ims_token(credential: impl Into<String>, account_id: AccountId) -> Self {
		Self::new(AuthType::ImsToken, credential, account_id)
	}

	/// Attaches the subject identifier.
	pub fn with_user_id(mut self, user_id: UserId) -> Self {
		self.user_id = Some(user_id);

		self
	}
}
impl Debug for ContextCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ContextCredentials")
			.field("auth_type", &self.auth_type)
			.field("credential", &"<redacted>")
			.field("account_id", &self.account_id)
			.field("user_id", &self.user_id)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn only_iam_access_tokens_validate_the_key_identifier() {
		assert!(AuthType::IamAccessToken.validates_key_identifier());
		assert!(!AuthType::ImsToken.validates_key_identifier());
	}

	#[test]
	fn auth_type_tags_round_trip_through_strings() {
		for kind in [AuthType::IamAccessToken, AuthType::ImsToken] {
			assert_eq!(kind.as_str().parse::<AuthType>(), Ok(kind));
			assert_eq!(
				serde_json::to_string(&kind).expect("Auth type should serialize."),
				format!("\"{kind}\"")
			);
		}

		assert_eq!(
			"IAM_API_KEY".parse::<AuthType>(),
			Err(UnknownAuthType { value: "IAM_API_KEY".into() })
		);
	}

	#[test]
	fn debug_redacts_the_credential() {
		let account = AccountId::new("acct-1").expect("Account fixture should be valid.");
		let creds = ContextCredentials::iam_access_token("Bearer very-secret", account)
			.with_user_id(UserId::new("user-1").expect("User fixture should be valid."));
		let rendered = format!("{creds:?}");

		assert!(!rendered.contains("very-secret"));
		assert!(rendered.contains("User(user-1)"));
	}

	#[test]
	fn deserializes_upstream_shape() {
		let creds: ContextCredentials = serde_json::from_str(
			r#"{"auth_type":"IMS_TOKEN","credential":"ims","account_id":"acct-9"}"#,
		)
		.expect("Credentials without user_id should deserialize.");

		assert_eq!(creds.auth_type, AuthType::ImsToken);
		assert!(creds.user_id.is_none());
	}
}
