use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, NoteService, Result};

/// Claims carried by the session token. The subject is the authenticated
/// email; the internal user id is resolved fresh on every request.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
	pub sub: String,
	pub iat: i64,
	pub exp: i64,
}

/// The per-request session view. `user_id` is absent when the user lookup
/// failed or found nothing; note operations then stop at their Unauthorized
/// precondition.
#[derive(Debug, Clone)]
pub struct Session {
	pub email: String,
	pub user_id: Option<Uuid>,
	pub name: Option<String>,
	pub image: Option<String>,
}
impl Session {
	pub fn require_user_id(&self) -> Result<Uuid> {
		self.user_id.ok_or(Error::Unauthorized)
	}
}

pub fn mint_session_token(email: &str, secret: &str, ttl_hours: i64) -> Result<String> {
	let now = OffsetDateTime::now_utc().unix_timestamp();
	let claims = SessionClaims { sub: email.to_string(), iat: now, exp: now + ttl_hours * 3_600 };

	jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
		.map_err(|err| Error::Provider { message: format!("Failed to mint session token: {err}") })
}

pub fn verify_session_token(token: &str, secret: &str) -> Result<SessionClaims> {
	let mut validation = Validation::default();

	// The token carries no registered claims beyond exp.
	validation.required_spec_claims.clear();
	validation.validate_exp = true;

	jsonwebtoken::decode::<SessionClaims>(
		token,
		&DecodingKey::from_secret(secret.as_bytes()),
		&validation,
	)
	.map(|data| data.claims)
	.map_err(|_| Error::Unauthorized)
}

impl NoteService {
	pub fn mint_session_token(&self, email: &str) -> Result<String> {
		mint_session_token(email, &self.cfg.auth.session_secret, self.cfg.auth.session_ttl_hours)
	}

	pub fn verify_session_token(&self, token: &str) -> Result<SessionClaims> {
		verify_session_token(token, &self.cfg.auth.session_secret)
	}

	/// Attach the internal user id to the session. A storage failure here is
	/// logged and swallowed; the session materializes without an id instead
	/// of dying.
	pub async fn materialize_session(&self, email: &str) -> Session {
		match jot_storage::users::find_by_email(&self.db, email).await {
			Ok(Some(user)) => Session {
				email: user.email,
				user_id: Some(user.user_id),
				name: Some(user.name),
				image: user.image,
			},
			Ok(None) => {
				tracing::warn!(email, "No user record behind an authenticated session.");

				Session { email: email.to_string(), user_id: None, name: None, image: None }
			},
			Err(err) => {
				tracing::warn!(%err, "User lookup failed during session materialization.");

				Session { email: email.to_string(), user_id: None, name: None, image: None }
			},
		}
	}
}
