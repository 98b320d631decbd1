pub mod github;
pub mod google;

mod state;

pub use state::{LOGIN_STATE_TTL_SECS, LoginState, mint_login_state, verify_login_state};

use oauth2::{EndpointNotSet, EndpointSet};

use crate::Error;

/// OAuth client type with auth URL and token URL set.
pub(crate) type ConfiguredClient = oauth2::Client<
	oauth2::basic::BasicErrorResponse,
	oauth2::basic::BasicTokenResponse,
	oauth2::basic::BasicTokenIntrospectionResponse,
	oauth2::StandardRevocableToken,
	oauth2::basic::BasicRevocationErrorResponse,
	EndpointSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointSet,
>;

/// Output of the login-start step: where to send the browser, plus the CSRF
/// state and PKCE verifier that must survive until the callback.
#[derive(Debug)]
pub struct AuthorizeUrl {
	pub url: String,
	pub csrf_state: String,
	pub pkce_verifier: String,
}

pub(crate) fn provider_err<E: std::fmt::Display>(err: E) -> Error {
	Error::Provider { message: err.to_string() }
}

pub(crate) fn token_exchange_client() -> crate::Result<reqwest::Client> {
	// Following redirects during the code exchange would be an SSRF vector.
	reqwest::ClientBuilder::new()
		.redirect(reqwest::redirect::Policy::none())
		.build()
		.map_err(provider_err)
}
