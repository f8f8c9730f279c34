//! Fixtures shared by integration tests.

#![allow(dead_code)]

// std
use std::{
	path::PathBuf,
	time::{SystemTime, UNIX_EPOCH},
};
// self
use service_token_signer::{
	AccountId, AuthType, ContextCredentials, SigningKey, UserId,
	jsonwebtoken::{self, Validation},
	token::{ServiceTokenClaims, SignedToken},
};

pub const PRIVATE_KEY_PKCS8: &str = include_str!("../fixtures/rsa_private_pkcs8.pem");
pub const PRIVATE_KEY_PKCS1: &str = include_str!("../fixtures/rsa_private_pkcs1.pem");
pub const PUBLIC_KEY: &str = include_str!("../fixtures/rsa_public.pem");
pub const PRIVATE_KEY_ALT: &str = include_str!("../fixtures/rsa_private_alt.pem");
pub const PUBLIC_KEY_ALT: &str = include_str!("../fixtures/rsa_public_alt.pem");

pub const TEST_ACCOUNT: &str = "12e97cfa3b0f4d5e8a6b";
pub const TEST_USER: &str = "IBMid-550000ABCD";
pub const TEST_ACCESS_TOKEN: &str = "eyJraWQiOiJ0ZXN0In0.provider-access-token";

pub fn signing_key() -> SigningKey {
	SigningKey::from_rsa_pem(PRIVATE_KEY_PKCS8).expect("Fixture signing key should parse.")
}

pub fn alt_signing_key() -> SigningKey {
	SigningKey::from_rsa_pem(PRIVATE_KEY_ALT).expect("Alternate fixture signing key should parse.")
}

pub fn credentials(auth_type: AuthType) -> ContextCredentials {
	let account = AccountId::new(TEST_ACCOUNT).expect("Account fixture should be valid.");

	ContextCredentials::new(auth_type, TEST_ACCESS_TOKEN, account)
}

pub fn credentials_with_user(auth_type: AuthType) -> ContextCredentials {
	credentials(auth_type).with_user_id(UserId::new(TEST_USER).expect("User fixture should be valid."))
}

/// Verifies `token` against the fixture public key and returns its claims.
pub fn verify(token: &SignedToken) -> ServiceTokenClaims {
	try_verify(token, PUBLIC_KEY).expect("Issued token should verify against the fixture public key.")
}

/// Verifies `token` against `public_pem`, returning the claims on success.
pub fn try_verify(
	token: &SignedToken,
	public_pem: &str,
) -> Result<ServiceTokenClaims, jsonwebtoken::errors::Error> {
	let key = jsonwebtoken::DecodingKey::from_rsa_pem(public_pem.as_bytes())
		.expect("Fixture public key should parse.");
	let mut validation = Validation::new(token.algorithm.to_jwt_algorithm());

	validation.validate_aud = false;

	jsonwebtoken::decode::<ServiceTokenClaims>(token.expose(), &key, &validation)
		.map(|data| data.claims)
}

/// Creates an empty scratch directory unique to this process and `label`.
pub fn scratch_dir(label: &str) -> PathBuf {
	let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
	let dir = std::env::temp_dir()
		.join(format!("service-token-signer-{label}-{}-{nanos}", std::process::id()));

	std::fs::create_dir_all(&dir).expect("Scratch directory should be creatable.");

	dir
}
