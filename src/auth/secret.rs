//! Redacting wrapper for upstream bearer credentials.

// self
use crate::_prelude::*;

/// Redacted credential wrapper keeping upstream bearer values out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialSecret(String);
impl CredentialSecret {
	/// Wraps a new credential string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner credential value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` if no credential value was supplied.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for CredentialSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for CredentialSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("CredentialSecret").field(&"<redacted>").finish()
	}
}
impl Display for CredentialSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
