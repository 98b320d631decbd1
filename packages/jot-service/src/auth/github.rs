use oauth2::{
	AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, PkceCodeChallenge,
	PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl, basic::BasicClient,
};
use serde::Deserialize;

use super::{AuthorizeUrl, ConfiguredClient, provider_err, token_exchange_client};
use crate::{AssertedProfile, Error, Result};

const AUTH_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_URL: &str = "https://api.github.com/user";
const EMAILS_URL: &str = "https://api.github.com/user/emails";
// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = "jot";

#[derive(Debug, Deserialize)]
struct GitHubUser {
	login: String,
	email: Option<String>,
	name: Option<String>,
	avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubEmail {
	email: String,
	primary: bool,
	verified: bool,
}

pub struct GitHubOAuth {
	client_id: ClientId,
	client_secret: ClientSecret,
	redirect_url: RedirectUrl,
}
impl GitHubOAuth {
	pub fn new(cfg: &jot_config::Config) -> Result<Self> {
		let redirect = format!("{}/auth/github/callback", cfg.service.public_url);

		Ok(Self {
			client_id: ClientId::new(cfg.auth.github.client_id.clone()),
			client_secret: ClientSecret::new(cfg.auth.github.client_secret.clone()),
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

	pub fn authorize_url(&self) -> Result<AuthorizeUrl> {
		let client = self.create_client()?;
		let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
		let (auth_url, csrf_state) = client
			.authorize_url(CsrfToken::new_random)
			.add_scope(Scope::new("read:user".to_string()))
			.add_scope(Scope::new("user:email".to_string()))
			.set_pkce_challenge(pkce_challenge)
			.url();

		Ok(AuthorizeUrl {
			url: auth_url.to_string(),
			csrf_state: csrf_state.secret().clone(),
			pkce_verifier: pkce_verifier.secret().clone(),
		})
	}

	/// Exchange the code, fetch the profile, and fall back to the primary
	/// verified address when the profile hides its email.
	pub async fn fetch_profile(&self, code: &str, pkce_verifier: &str) -> Result<AssertedProfile> {
		let http_client = token_exchange_client()?;
		let token = self
			.create_client()?
			.exchange_code(AuthorizationCode::new(code.to_string()))
			.set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
			.request_async(&http_client)
			.await
			.map_err(|err| Error::Provider { message: format!("Token exchange failed: {err}") })?;
		let access_token = token.access_token().secret().clone();
		let api_client = reqwest::Client::new();
		let user: GitHubUser = api_client
			.get(USER_URL)
			.bearer_auth(&access_token)
			.header("User-Agent", USER_AGENT)
			.send()
			.await
			.map_err(provider_err)?
			.error_for_status()
			.map_err(provider_err)?
			.json()
			.await
			.map_err(provider_err)?;
		let email = match user.email {
			Some(email) => email,
			None => {
				let emails: Vec<GitHubEmail> = api_client
					.get(EMAILS_URL)
					.bearer_auth(&access_token)
					.header("User-Agent", USER_AGENT)
					.send()
					.await
					.map_err(provider_err)?
					.error_for_status()
					.map_err(provider_err)?
					.json()
					.await
					.map_err(provider_err)?;

				emails
					.into_iter()
					.find(|entry| entry.primary && entry.verified)
					.map(|entry| entry.email)
					.ok_or_else(|| Error::Provider {
						message: "No verified primary email on the GitHub account.".to_string(),
					})?
			},
		};

		Ok(AssertedProfile {
			name: user.name.unwrap_or(user.login),
			email,
			image: user.avatar_url,
		})
	}
}
