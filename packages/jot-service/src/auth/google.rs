use oauth2::{
	AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, PkceCodeChallenge,
	PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl, basic::BasicClient,
};
use serde::Deserialize;

use super::{AuthorizeUrl, ConfiguredClient, provider_err, token_exchange_client};
use crate::{AssertedProfile, Error, Result};

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Google userinfo response.
#[derive(Debug, Deserialize)]
struct GoogleUser {
	email: String,
	name: Option<String>,
	picture: Option<String>,
}

pub struct GoogleOAuth {
	client_id: ClientId,
	client_secret: ClientSecret,
	redirect_url: RedirectUrl,
}
impl GoogleOAuth {
	pub fn new(cfg: &jot_config::Config) -> Result<Self> {
		let redirect = format!("{}/auth/google/callback", cfg.service.public_url);

		Ok(Self {
			client_id: ClientId::new(cfg.auth.google.client_id.clone()),
			client_secret: ClientSecret::new(cfg.auth.google.client_secret.clone()),
			redirect_url: RedirectUrl::new(redirect).map_err(provider_err)?,
		})
	}

	fn create_client(&self) -> Result<ConfiguredClient> {
		Ok(BasicClient::new(self.client_id.clone())
			.set_client_secret(self.client_secret.clone())
			.set_auth_uri(AuthUrl::new(AUTH_URL.to_string()).map_err(provider_err)?)
			.set_token_uri(TokenUrl::new(TOKEN_URL.to_string()).map_err(provider_err)?)
			.set_redirect_uri(self.redirect_url.clone()))
	}

	/// Build the authorization URL with a fresh CSRF state and PKCE
	/// challenge.
	pub fn authorize_url(&self) -> Result<AuthorizeUrl> {
		let client = self.create_client()?;
		let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
		let (auth_url, csrf_state) = client
			.authorize_url(CsrfToken::new_random)
			.add_scope(Scope::new("openid".to_string()))
			.add_scope(Scope::new("email".to_string()))
			.add_scope(Scope::new("profile".to_string()))
			.set_pkce_challenge(pkce_challenge)
			.url();

		Ok(AuthorizeUrl {
			url: auth_url.to_string(),
			csrf_state: csrf_state.secret().clone(),
			pkce_verifier: pkce_verifier.secret().clone(),
		})
	}

	/// Exchange the authorization code for an access token and fetch the
	/// asserted profile.
	pub async fn fetch_profile(&self, code: &str, pkce_verifier: &str) -> Result<AssertedProfile> {
		let http_client = token_exchange_client()?;
		let token = self
			.create_client()?
			.exchange_code(AuthorizationCode::new(code.to_string()))
			.set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
			.request_async(&http_client)
			.await
			.map_err(|err| Error::Provider { message: format!("Token exchange failed: {err}") })?;
		let user: GoogleUser = reqwest::Client::new()
			.get(USERINFO_URL)
			.bearer_auth(token.access_token().secret())
			.send()
			.await
			.map_err(provider_err)?
			.error_for_status()
			.map_err(provider_err)?
			.json()
			.await
			.map_err(provider_err)?;

		Ok(AssertedProfile {
			name: user.name.unwrap_or_default(),
			email: user.email,
			image: user.picture,
		})
	}
}
