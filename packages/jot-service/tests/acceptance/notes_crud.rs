use jot_service::{CreateRequest, DeleteRequest, Error, Session, UpdateRequest};
use uuid::Uuid;

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn create_then_list_roundtrip() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping create_then_list_roundtrip; set JOT_PG_DSN to run.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let session = super::signed_in_session(&service, "a@x.com").await;
	let created = service
		.create(
			&session,
			CreateRequest { title: "Shopping".to_string(), content: "milk, eggs".to_string() },
		)
		.await
		.expect("Create failed.");

	assert_eq!(created.user_id, session.user_id.unwrap());
	assert_eq!(created.created_at, created.updated_at);

	let listed = service.list(&session).await.expect("List failed.");

	assert_eq!(listed.notes.len(), 1);
	assert_eq!(listed.notes[0].note_id, created.note_id);
	assert_eq!(listed.notes[0].title, "Shopping");
	assert_eq!(listed.notes[0].content, "milk, eggs");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn update_refreshes_updated_at_only() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping update_refreshes_updated_at_only; set JOT_PG_DSN to run.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let session = super::signed_in_session(&service, "a@x.com").await;
	let created = service
		.create(
			&session,
			CreateRequest { title: "Shopping".to_string(), content: "milk, eggs".to_string() },
		)
		.await
		.expect("Create failed.");

	tokio::time::sleep(std::time::Duration::from_millis(5)).await;

	let updated = service
		.update(
			&session,
			UpdateRequest {
				note_id: created.note_id,
				title: "Shopping".to_string(),
				content: "milk, eggs, bread".to_string(),
			},
		)
		.await
		.expect("Update failed.");

	assert_eq!(updated.note_id, created.note_id);
	assert_eq!(updated.content, "milk, eggs, bread");
	assert_eq!(updated.created_at, created.created_at);
	assert!(updated.updated_at > created.created_at);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn validation_failures_leave_the_store_unchanged() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping validation_failures_leave_the_store_unchanged; set JOT_PG_DSN to run.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let session = super::signed_in_session(&service, "a@x.com").await;
	let err = service
		.create(&session, CreateRequest { title: String::new(), content: "body".to_string() })
		.await
		.expect_err("Empty title must fail.");

	assert!(matches!(err, Error::Validation { ref field } if field == "title"));

	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM notes")
		.fetch_one(&service.db.pool)
		.await
		.expect("Failed to count notes.");

	assert_eq!(count, 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn cross_user_mutations_are_not_found() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping cross_user_mutations_are_not_found; set JOT_PG_DSN to run.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let owner = super::signed_in_session(&service, "owner@x.com").await;
	let intruder = super::signed_in_session(&service, "intruder@x.com").await;
	let note = service
		.create(
			&owner,
			CreateRequest { title: "Private".to_string(), content: "secret".to_string() },
		)
		.await
		.expect("Create failed.");
	let err = service
		.update(
			&intruder,
			UpdateRequest {
				note_id: note.note_id,
				title: "Stolen".to_string(),
				content: "gotcha".to_string(),
			},
		)
		.await
		.expect_err("Cross-user update must fail.");

	assert!(matches!(err, Error::NotFound { .. }));

	let err = service
		.delete(&intruder, DeleteRequest { note_id: note.note_id })
		.await
		.expect_err("Cross-user delete must fail.");

	assert!(matches!(err, Error::NotFound { .. }));

	// The intruder's list never shows the other user's note.
	let listed = service.list(&intruder).await.expect("List failed.");

	assert!(listed.notes.is_empty());

	// The note is untouched for its owner.
	let listed = service.list(&owner).await.expect("List failed.");

	assert_eq!(listed.notes.len(), 1);
	assert_eq!(listed.notes[0].title, "Private");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn second_delete_is_not_found() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping second_delete_is_not_found; set JOT_PG_DSN to run.");

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let session = super::signed_in_session(&service, "a@x.com").await;
	let note = service
		.create(&session, CreateRequest { title: "Once".to_string(), content: "only".to_string() })
		.await
		.expect("Create failed.");
	let deleted = service
		.delete(&session, DeleteRequest { note_id: note.note_id })
		.await
		.expect("First delete failed.");

	assert_eq!(deleted.note_id, note.note_id);

	let err = service
		.delete(&session, DeleteRequest { note_id: note.note_id })
		.await
		.expect_err("Second delete must fail.");

	assert!(matches!(err, Error::NotFound { .. }));

	// A random id nobody owns behaves the same.
	let err = service
		.delete(&session, DeleteRequest { note_id: Uuid::new_v4() })
		.await
		.expect_err("Unknown id must fail.");

	assert!(matches!(err, Error::NotFound { .. }));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn operations_without_a_user_id_never_touch_the_store() {
	let Some(test_db) = super::test_db().await else {
		eprintln!(
			"Skipping operations_without_a_user_id_never_touch_the_store; set JOT_PG_DSN to run."
		);

		return;
	};
	let service = super::build_service(super::test_config(test_db.dsn().to_string())).await;
	let session =
		Session { email: "ghost@x.com".to_string(), user_id: None, name: None, image: None };
	let err = service.list(&session).await.expect_err("List without user id must fail.");

	assert!(matches!(err, Error::Unauthorized));

	let err = service
		.create(&session, CreateRequest { title: "t".to_string(), content: "c".to_string() })
		.await
		.expect_err("Create without user id must fail.");

	assert!(matches!(err, Error::Unauthorized));

	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM notes")
		.fetch_one(&service.db.pool)
		.await
		.expect("Failed to count notes.");

	assert_eq!(count, 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
