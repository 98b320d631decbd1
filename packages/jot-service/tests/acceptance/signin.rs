use jot_service::Provider;

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn first_signin_creates_exactly_one_user() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping first_signin_creates_exactly_one_user; set JOT_PG_DSN to run.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let first = service
		.sign_in(Provider::Google, &super::profile("Ada", "a@x.com"))
		.await
		.expect("First sign-in failed.");

	// A second sign-in with the same email, even via the other provider,
	// creates nothing.
	let second = service
		.sign_in(Provider::GitHub, &super::profile("Ada L.", "a@x.com"))
		.await
		.expect("Second sign-in failed.");

	assert_eq!(first.user_id, second.user_id);
	assert_eq!(second.name, "Ada");

	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM users")
		.fetch_one(&service.db.pool)
		.await
		.expect("Failed to count users.");

	assert_eq!(count, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn signin_with_blank_email_is_rejected() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping signin_with_blank_email_is_rejected; set JOT_PG_DSN to run.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let result = service.sign_in(Provider::Google, &super::profile("Ghost", "  ")).await;

	assert!(result.is_err());

	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM users")
		.fetch_one(&service.db.pool)
		.await
		.expect("Failed to count users.");

	assert_eq!(count, 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn session_materialization_resolves_the_user_id() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping session_materialization_resolves_the_user_id; set JOT_PG_DSN to run.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let user = service
		.sign_in(Provider::Google, &super::profile("Ada", "a@x.com"))
		.await
		.expect("Sign-in failed.");
	let token = service.mint_session_token(&user.email).expect("Failed to mint session token.");
	let claims = service.verify_session_token(&token).expect("Failed to verify session token.");
	let session = service.materialize_session(&claims.sub).await;

	assert_eq!(session.user_id, Some(user.user_id));
	assert_eq!(session.name.as_deref(), Some("Ada"));

	// An authenticated email without a user record materializes without an
	// id instead of failing.
	let degraded = service.materialize_session("nobody@x.com").await;

	assert_eq!(degraded.user_id, None);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
