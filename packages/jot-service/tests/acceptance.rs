mod acceptance {
	mod notes_crud;
	mod signin;

	use jot_service::{AssertedProfile, NoteService, Provider, Session};
	use jot_storage::db::Db;
	use jot_testkit::TestDatabase;

	pub async fn test_db() -> Option<TestDatabase> {
		let base_dsn = jot_testkit::env_dsn()?;
		let db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");

		Some(db)
	}

	pub fn test_config(dsn: String) -> jot_config::Config {
		jot_config::Config {
			service: jot_config::Service {
				http_bind: "127.0.0.1:0".to_string(),
				public_url: "http://127.0.0.1:0".to_string(),
				log_level: "info".to_string(),
			},
			storage: jot_config::Storage {
				postgres: jot_config::Postgres { dsn, pool_max_conns: 2 },
			},
			auth: jot_config::Auth {
				session_secret: "0123456789abcdef0123456789abcdef".to_string(),
				session_ttl_hours: 1,
				post_login_path: "/".to_string(),
				google: jot_config::OauthClient {
					client_id: "test-google".to_string(),
					client_secret: "test-google-secret".to_string(),
				},
				github: jot_config::OauthClient {
					client_id: "test-github".to_string(),
					client_secret: "test-github-secret".to_string(),
				},
			},
			security: jot_config::Security { bind_localhost_only: true },
		}
	}

	pub async fn build_service(cfg: jot_config::Config) -> NoteService {
		let db = Db::connect(&cfg.storage.postgres).await.expect("Failed to connect to Postgres.");

		db.ensure_schema().await.expect("Failed to ensure schema.");

		NoteService::new(cfg, db)
	}

	pub fn profile(name: &str, email: &str) -> AssertedProfile {
		AssertedProfile { name: name.to_string(), email: email.to_string(), image: None }
	}

	/// Sign in and materialize a session the way the HTTP layer would.
	pub async fn signed_in_session(service: &NoteService, email: &str) -> Session {
		service
			.sign_in(Provider::Google, &profile("Tester", email))
			.await
			.expect("Sign-in failed.");

		let session = service.materialize_session(email).await;

		assert!(session.user_id.is_some(), "Session must carry a user id after sign-in.");

		session
	}
}
