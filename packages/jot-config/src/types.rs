use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub auth: Auth,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	/// Externally reachable base URL. OAuth redirect URIs are derived from it.
	pub public_url: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
	/// HS256 key for session and login-state tokens.
	pub session_secret: String,
	pub session_ttl_hours: i64,
	#[serde(default = "default_post_login_path")]
	pub post_login_path: String,
	pub google: OauthClient,
	pub github: OauthClient,
}

#[derive(Debug, Deserialize)]
pub struct OauthClient {
	pub client_id: String,
	pub client_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}

fn default_post_login_path() -> String {
	"/".to_string()
}
