use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, db::Db, models::Note};

pub async fn list_for_user(db: &Db, user_id: Uuid) -> Result<Vec<Note>> {
	let notes = sqlx::query_as(
		"\
SELECT note_id, user_id, title, content, created_at, updated_at
FROM notes
WHERE user_id = $1
ORDER BY created_at DESC",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(notes)
}

pub async fn insert(db: &Db, user_id: Uuid, title: &str, content: &str) -> Result<Note> {
	let now = OffsetDateTime::now_utc();
	let note = sqlx::query_as(
		"\
INSERT INTO notes (note_id, user_id, title, content, created_at, updated_at)
VALUES ($1, $2, $3, $4, $5, $6)
RETURNING note_id, user_id, title, content, created_at, updated_at",
	)
	.bind(Uuid::new_v4())
	.bind(user_id)
	.bind(title)
	.bind(content)
	.bind(now)
	.bind(now)
	.fetch_one(&db.pool)
	.await?;

	Ok(note)
}

/// Owner filtering happens inside the statement itself. A note that exists
/// but belongs to another user updates zero rows and comes back as `None`.
pub async fn update_owned(
	db: &Db,
	note_id: Uuid,
	user_id: Uuid,
	title: &str,
	content: &str,
) -> Result<Option<Note>> {
	let note = sqlx::query_as(
		"\
UPDATE notes
SET title = $3, content = $4, updated_at = $5
WHERE note_id = $1 AND user_id = $2
RETURNING note_id, user_id, title, content, created_at, updated_at",
	)
	.bind(note_id)
	.bind(user_id)
	.bind(title)
	.bind(content)
	.bind(OffsetDateTime::now_utc())
	.fetch_optional(&db.pool)
	.await?;

	Ok(note)
}

pub async fn delete_owned(db: &Db, note_id: Uuid, user_id: Uuid) -> Result<Option<Uuid>> {
	let deleted: Option<(Uuid,)> = sqlx::query_as(
		"\
DELETE FROM notes
WHERE note_id = $1 AND user_id = $2
RETURNING note_id",
	)
	.bind(note_id)
	.bind(user_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(deleted.map(|(note_id,)| note_id))
}
