//! Signed service token returned to callers.

// self
use crate::{
	_prelude::*,
	key::{KeyIdentifier, SigningAlgorithm},
};

/// Compact JWS produced by a successful issuance.
///
/// The caller owns the value and is responsible for presenting it before
/// [`expires_at`](Self::expires_at). Formatters redact the token body.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedToken {
	value: String,
	/// Identifier of the key that signed the token.
	pub key_identifier: KeyIdentifier,
	/// Algorithm used for the signature.
	pub algorithm: SigningAlgorithm,
	/// Issued-at instant embedded as `iat`.
	pub issued_at: OffsetDateTime,
	/// Expiry instant embedded as `exp`.
	pub expires_at: OffsetDateTime,
}
impl SignedToken {
	pub(crate) fn new(
		value: String,
		key_identifier: KeyIdentifier,
		algorithm: SigningAlgorithm,
		issued_at: OffsetDateTime,
		expires_at: OffsetDateTime,
	) -> Self {
		Self { value, key_identifier, algorithm, issued_at, expires_at }
	}

	/// Returns the compact JWS. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.value
	}

	/// Consumes the wrapper, returning the compact JWS.
	pub fn into_inner(self) -> String {
		self.value
	}

	/// Returns `true` if the token has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}

	/// Returns `true` if the token is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}
}
impl AsRef<str> for SignedToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignedToken")
			.field("value", &"<redacted>")
			.field("key_identifier", &self.key_identifier)
			.field("algorithm", &self.algorithm)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
impl Display for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn token() -> SignedToken {
		SignedToken::new(
			"header.payload.signature".into(),
			KeyIdentifier::new("kid-7"),
			SigningAlgorithm::Rs256,
			macros::datetime!(2025-01-01 00:00 UTC),
			macros::datetime!(2025-01-01 02:35 UTC),
		)
	}

	#[test]
	fn formatters_redact_the_jws() {
		let token = token();

		assert_eq!(format!("{token}"), "<redacted>");
		assert!(!format!("{token:?}").contains("payload"));
		assert_eq!(token.expose(), "header.payload.signature");
	}

	#[test]
	fn expiry_boundary_is_exclusive() {
		let token = token();

		assert!(!token.is_expired_at(macros::datetime!(2025-01-01 02:34:59 UTC)));
		assert!(token.is_expired_at(macros::datetime!(2025-01-01 02:35 UTC)));
	}
}
