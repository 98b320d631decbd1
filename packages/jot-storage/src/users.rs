use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result, db::Db, models::User};

pub async fn find_by_email(db: &Db, email: &str) -> Result<Option<User>> {
	let user = sqlx::query_as(
		"\
SELECT user_id, name, email, image, created_at, updated_at
FROM users
WHERE email = $1",
	)
	.bind(email)
	.fetch_optional(&db.pool)
	.await?;

	Ok(user)
}

pub async fn find_by_id(db: &Db, user_id: Uuid) -> Result<Option<User>> {
	let user = sqlx::query_as(
		"\
SELECT user_id, name, email, image, created_at, updated_at
FROM users
WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(user)
}

/// Create a user for `email` unless one already exists, then return the
/// stored row. `ON CONFLICT DO NOTHING` plus the re-select keeps a concurrent
/// first sign-in down to exactly one row.
pub async fn create_if_absent(
	db: &Db,
	name: &str,
	email: &str,
	image: Option<&str>,
) -> Result<User> {
	if let Some(user) = find_by_email(db, email).await? {
		return Ok(user);
	}

	let now = OffsetDateTime::now_utc();

	sqlx::query(
		"\
INSERT INTO users (user_id, name, email, image, created_at, updated_at)
VALUES ($1, $2, $3, $4, $5, $6)
ON CONFLICT (email) DO NOTHING",
	)
	.bind(Uuid::new_v4())
	.bind(name)
	.bind(email)
	.bind(image)
	.bind(now)
	.bind(now)
	.execute(&db.pool)
	.await?;

	find_by_email(db, email)
		.await?
		.ok_or_else(|| Error::NotFound(format!("User {email} missing after insert.")))
}
