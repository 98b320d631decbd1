mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Auth, Config, OauthClient, Postgres, Security, Service, Storage};

use std::{fs, path::Path};

/// Secrets are 32 bytes minimum so the HS256 key is not weaker than its
/// digest.
const MIN_SESSION_SECRET_LEN: usize = 32;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if !cfg.service.public_url.starts_with("http://")
		&& !cfg.service.public_url.starts_with("https://")
	{
		return Err(Error::Validation {
			message: "service.public_url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.auth.session_secret.trim().len() < MIN_SESSION_SECRET_LEN {
		return Err(Error::Validation {
			message: format!(
				"auth.session_secret must be at least {MIN_SESSION_SECRET_LEN} characters."
			),
		});
	}
	if cfg.auth.session_ttl_hours <= 0 {
		return Err(Error::Validation {
			message: "auth.session_ttl_hours must be greater than zero.".to_string(),
		});
	}

	for (label, client) in [("google", &cfg.auth.google), ("github", &cfg.auth.github)] {
		if client.client_id.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("auth.{label}.client_id must be non-empty."),
			});
		}
		if client.client_secret.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("auth.{label}.client_secret must be non-empty."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.service.public_url.ends_with('/') {
		cfg.service.public_url.pop();
	}

	if cfg.auth.post_login_path.trim().is_empty() {
		cfg.auth.post_login_path = "/".to_string();
	}
}
