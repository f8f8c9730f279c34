//! Fixtures shared by unit tests.

// self
use crate::{
	auth::{AccountId, AuthType, ContextCredentials, UserId},
	key::SigningKey,
};

pub const PRIVATE_KEY_PKCS8: &str = include_str!("../tests/fixtures/rsa_private_pkcs8.pem");
pub const PRIVATE_KEY_PKCS1: &str = include_str!("../tests/fixtures/rsa_private_pkcs1.pem");
pub const PRIVATE_KEY_1024: &str = include_str!("../tests/fixtures/rsa_private_1024.pem");
pub const PUBLIC_KEY: &str = include_str!("../tests/fixtures/rsa_public.pem");

pub const ACCOUNT: &str = "12e97cfa3b0f4d5e8a6b";
pub const USER: &str = "IBMid-550000ABCD";
pub const ACCESS_TOKEN: &str = "eyJraWQiOiJ0ZXN0In0.provider-access-token";

pub fn signing_key() -> SigningKey {
	SigningKey::from_rsa_pem(PRIVATE_KEY_PKCS8).expect("Fixture signing key should parse.")
}

pub fn credentials(auth_type: AuthType) -> ContextCredentials {
	let account = AccountId::new(ACCOUNT).expect("Account fixture should be valid.");

	ContextCredentials::new(auth_type, ACCESS_TOKEN, account)
}

pub fn credentials_with_user(auth_type: AuthType) -> ContextCredentials {
	credentials(auth_type).with_user_id(UserId::new(USER).expect("User fixture should be valid."))
}
