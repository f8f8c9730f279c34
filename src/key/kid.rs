//! Key identifier labels and the placeholder sentinel.

// self
use crate::_prelude::*;

/// Placeholder identifier meaning "no real signing key has been provisioned".
pub const SAMPLE_KEY_SENTINEL: &str = "sample_key";

/// Label selecting which public key the downstream verifier uses for a token.
///
/// Unlike the credential identifiers, a key identifier may be empty: an empty or
/// placeholder label is a policy rejection at issuance time, not a construction error.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyIdentifier(String);
impl KeyIdentifier {
	/// Wraps the provided label verbatim.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the label.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns `true` if no label is configured.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns `true` if the label is exactly [`SAMPLE_KEY_SENTINEL`].
	pub fn is_sentinel(&self) -> bool {
		self.0 == SAMPLE_KEY_SENTINEL
	}
}
impl AsRef<str> for KeyIdentifier {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<&str> for KeyIdentifier {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for KeyIdentifier {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for KeyIdentifier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "KeyIdentifier({:?})", self.0)
	}
}
impl Display for KeyIdentifier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn sentinel_match_is_exact() {
		assert!(KeyIdentifier::new("sample_key").is_sentinel());
		assert!(!KeyIdentifier::new("sample_key_invalid").is_sentinel());
		assert!(!KeyIdentifier::new("no_sample_key").is_sentinel());
		assert!(!KeyIdentifier::new("SAMPLE_KEY").is_sentinel());
		assert!(!KeyIdentifier::new(" sample_key").is_sentinel());
	}

	#[test]
	fn empty_is_representable() {
		let kid = KeyIdentifier::default();

		assert!(kid.is_empty());
		assert!(!kid.is_sentinel());
		assert_eq!(format!("{kid:?}"), "KeyIdentifier(\"\")");
	}
}
