use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
	pub user_id: Uuid,
	pub name: String,
	pub email: String,
	pub image: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Note {
	pub note_id: Uuid,
	pub user_id: Uuid,
	pub title: String,
	pub content: String,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
