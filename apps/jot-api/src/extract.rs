use axum::extract::FromRequestParts;
use axum::http::{StatusCode, header, request::Parts};
use axum_extra::extract::CookieJar;

use crate::auth::SESSION_COOKIE;
use crate::routes::{ApiError, json_error};
use crate::state::AppState;

/// Extractor for an authenticated session: verifies the session token from
/// the cookie or a bearer header, then materializes the session against the
/// user store. Missing or invalid tokens are rejected here; a session
/// without a resolvable user id passes through and fails the operations'
/// own precondition.
pub struct Session(pub jot_service::Session);

impl FromRequestParts<AppState> for Session {
	type Rejection = ApiError;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let bearer = parts
			.headers
			.get(header::AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| value.strip_prefix("Bearer "))
			.map(str::to_string);
		let token = match bearer {
			Some(token) => token,
			None => CookieJar::from_headers(&parts.headers)
				.get(SESSION_COOKIE)
				.map(|cookie| cookie.value().to_string())
				.ok_or_else(unauthorized)?,
		};
		let claims =
			state.service.verify_session_token(&token).map_err(|_| unauthorized())?;
		let session = state.service.materialize_session(&claims.sub).await;

		Ok(Self(session))
	}
}

fn unauthorized() -> ApiError {
	json_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Unauthorized.", None)
}
