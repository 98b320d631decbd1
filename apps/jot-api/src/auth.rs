use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

use jot_service::auth::{
	AuthorizeUrl, LOGIN_STATE_TTL_SECS, LoginState, github::GitHubOAuth, google::GoogleOAuth,
	mint_login_state, verify_login_state,
};
use jot_service::{AssertedProfile, Provider};

use crate::extract::Session;
use crate::routes::{ApiError, json_error};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "jot_session";
const LOGIN_STATE_COOKIE: &str = "jot_login_state";

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
	pub code: Option<String>,
	pub state: Option<String>,
	pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
	pub email: String,
	pub user_id: Option<Uuid>,
	pub name: Option<String>,
	pub image: Option<String>,
}

/// GET /auth/{provider}/login. Parks the CSRF state and PKCE verifier in a
/// signed short-lived cookie and sends the browser to the provider.
pub async fn login(
	State(state): State<AppState>,
	jar: CookieJar,
	Path(provider_name): Path<String>,
) -> Result<Response, ApiError> {
	let Some(provider) = Provider::parse(&provider_name) else {
		return Err(unknown_provider(&provider_name));
	};
	let authorize = authorize_url(&state, provider)?;
	let login_state =
		LoginState::new(provider.as_str(), authorize.csrf_state, authorize.pkce_verifier);
	let token = mint_login_state(&login_state, &state.service.cfg.auth.session_secret)
		.map_err(|err| {
			tracing::error!(%err, "Failed to mint login state.");

			signin_rejected()
		})?;
	let cookie = Cookie::build((LOGIN_STATE_COOKIE, token))
		.http_only(true)
		.same_site(SameSite::Lax)
		.path("/")
		.max_age(Duration::seconds(LOGIN_STATE_TTL_SECS))
		.build();
	let jar = jar.add(cookie);

	Ok((jar, Redirect::to(&authorize.url)).into_response())
}

/// GET /auth/{provider}/callback. Every failure on this path rejects the
/// sign-in without setting a session cookie.
pub async fn callback(
	State(state): State<AppState>,
	jar: CookieJar,
	Path(provider_name): Path<String>,
	Query(query): Query<CallbackQuery>,
) -> Result<Response, ApiError> {
	let Some(provider) = Provider::parse(&provider_name) else {
		return Err(unknown_provider(&provider_name));
	};

	if query.error.is_some() {
		return Err(signin_rejected());
	}

	let secret = state.service.cfg.auth.session_secret.clone();
	let state_token =
		jar.get(LOGIN_STATE_COOKIE).map(|cookie| cookie.value().to_string()).ok_or_else(|| {
			tracing::warn!("Callback without a login state cookie.");

			signin_rejected()
		})?;
	let login_state = verify_login_state(&state_token, &secret).map_err(|_| signin_rejected())?;

	if login_state.provider != provider.as_str() {
		return Err(signin_rejected());
	}

	// The query state must match the one signed into the cookie exactly.
	if query.state.as_deref() != Some(login_state.state.as_str()) {
		return Err(signin_rejected());
	}

	let code = query.code.ok_or_else(signin_rejected)?;
	let profile = fetch_profile(&state, provider, &code, &login_state.pkce_verifier).await?;
	let user = state.service.sign_in(provider, &profile).await.map_err(|_| signin_rejected())?;
	let session_token = state.service.mint_session_token(&user.email).map_err(|err| {
		tracing::error!(%err, "Failed to mint session token.");

		signin_rejected()
	})?;
	let session_cookie = Cookie::build((SESSION_COOKIE, session_token))
		.http_only(true)
		.same_site(SameSite::Lax)
		.path("/")
		.max_age(Duration::hours(state.service.cfg.auth.session_ttl_hours))
		.build();
	let jar = jar.remove(clearing(LOGIN_STATE_COOKIE)).add(session_cookie);

	Ok((jar, Redirect::to(&state.service.cfg.auth.post_login_path)).into_response())
}

/// GET /auth/me. The extractor already rejects missing or invalid tokens.
pub async fn whoami(Session(session): Session) -> Json<SessionView> {
	Json(SessionView {
		email: session.email,
		user_id: session.user_id,
		name: session.name,
		image: session.image,
	})
}

/// POST /auth/logout.
pub async fn logout(jar: CookieJar) -> Response {
	let jar = jar.remove(clearing(SESSION_COOKIE));

	(jar, StatusCode::OK).into_response()
}

fn authorize_url(state: &AppState, provider: Provider) -> Result<AuthorizeUrl, ApiError> {
	let cfg = &state.service.cfg;
	let authorize = match provider {
		Provider::Google => GoogleOAuth::new(cfg).and_then(|oauth| oauth.authorize_url()),
		Provider::GitHub => GitHubOAuth::new(cfg).and_then(|oauth| oauth.authorize_url()),
	};

	authorize.map_err(|err| {
		tracing::error!(%err, provider = provider.as_str(), "Failed to build authorization URL.");

		signin_rejected()
	})
}

async fn fetch_profile(
	state: &AppState,
	provider: Provider,
	code: &str,
	pkce_verifier: &str,
) -> Result<AssertedProfile, ApiError> {
	let cfg = &state.service.cfg;
	let profile = match provider {
		Provider::Google => match GoogleOAuth::new(cfg) {
			Ok(oauth) => oauth.fetch_profile(code, pkce_verifier).await,
			Err(err) => Err(err),
		},
		Provider::GitHub => match GitHubOAuth::new(cfg) {
			Ok(oauth) => oauth.fetch_profile(code, pkce_verifier).await,
			Err(err) => Err(err),
		},
	};

	profile.map_err(|err| {
		tracing::error!(%err, provider = provider.as_str(), "Profile fetch failed.");

		signin_rejected()
	})
}

/// A removal cookie must carry the same path as the one it clears.
fn clearing(name: &'static str) -> Cookie<'static> {
	Cookie::build((name, "")).path("/").build()
}

fn signin_rejected() -> ApiError {
	json_error(StatusCode::UNAUTHORIZED, "SIGNIN_REJECTED", "Sign-in was rejected.", None)
}

fn unknown_provider(name: &str) -> ApiError {
	json_error(
		StatusCode::NOT_FOUND,
		"UNKNOWN_PROVIDER",
		format!("Unknown identity provider: {name}."),
		None,
	)
}
