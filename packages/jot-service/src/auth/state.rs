use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, Result};

pub const LOGIN_STATE_TTL_SECS: i64 = 600;

/// Everything the callback needs to finish the flow, signed and parked in a
/// short-lived cookie instead of a server-side table.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginState {
	pub state: String,
	pub pkce_verifier: String,
	pub provider: String,
	pub exp: i64,
}
impl LoginState {
	pub fn new(provider: &str, state: String, pkce_verifier: String) -> Self {
		Self {
			state,
			pkce_verifier,
			provider: provider.to_string(),
			exp: OffsetDateTime::now_utc().unix_timestamp() + LOGIN_STATE_TTL_SECS,
		}
	}
}

pub fn mint_login_state(claims: &LoginState, secret: &str) -> Result<String> {
	jsonwebtoken::encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes()))
		.map_err(|err| Error::Provider { message: format!("Failed to mint login state: {err}") })
}

pub fn verify_login_state(token: &str, secret: &str) -> Result<LoginState> {
	let mut validation = Validation::default();

	validation.required_spec_claims.clear();
	validation.validate_exp = true;

	jsonwebtoken::decode::<LoginState>(
		token,
		&DecodingKey::from_secret(secret.as_bytes()),
		&validation,
	)
	.map(|data| data.claims)
	.map_err(|_| Error::Provider { message: "Invalid or expired login state.".to_string() })
}
