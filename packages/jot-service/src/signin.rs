use serde::{Deserialize, Serialize};

use crate::{Error, NoteService, Result};
use jot_storage::models::User;

/// The two accepted identity providers. Anything else never reaches the
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
	Google,
	GitHub,
}
impl Provider {
	pub fn parse(name: &str) -> Option<Self> {
		match name {
			"google" => Some(Self::Google),
			"github" => Some(Self::GitHub),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Google => "google",
			Self::GitHub => "github",
		}
	}
}

/// Identity fields asserted by the provider after a successful code
/// exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertedProfile {
	pub name: String,
	pub email: String,
	pub image: Option<String>,
}

impl NoteService {
	/// Reconcile a provider-asserted identity with the user store. A storage
	/// failure rejects the sign-in; the caller must not issue a session
	/// token on error.
	pub async fn sign_in(&self, provider: Provider, profile: &AssertedProfile) -> Result<User> {
		let email = profile.email.trim();

		if email.is_empty() {
			return Err(Error::Provider {
				message: format!("Provider {} asserted no email.", provider.as_str()),
			});
		}

		let name = if profile.name.trim().is_empty() { email } else { profile.name.trim() };

		match jot_storage::users::create_if_absent(&self.db, name, email, profile.image.as_deref())
			.await
		{
			Ok(user) => {
				tracing::info!(provider = provider.as_str(), email, "Sign-in reconciled.");

				Ok(user)
			},
			Err(err) => {
				tracing::error!(%err, provider = provider.as_str(), "Sign-in reconciliation failed.");

				Err(err.into())
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_the_two_providers_parse() {
		assert_eq!(Provider::parse("google"), Some(Provider::Google));
		assert_eq!(Provider::parse("github"), Some(Provider::GitHub));
		assert_eq!(Provider::parse("gitlab"), None);
		assert_eq!(Provider::parse("Google"), None);
		assert_eq!(Provider::parse(""), None);
	}
}
