pub mod auth;
pub mod create;
pub mod delete;
pub mod list;
pub mod session;
pub mod signin;
pub mod time_serde;
pub mod update;

mod error;

pub use create::CreateRequest;
pub use delete::{DeleteRequest, DeleteResponse};
pub use error::{Error, Result};
pub use list::ListResponse;
pub use session::Session;
pub use signin::{AssertedProfile, Provider};
pub use update::UpdateRequest;

use time::OffsetDateTime;
use uuid::Uuid;

use jot_config::Config;
use jot_storage::{db::Db, models::Note};

pub struct NoteService {
	pub cfg: Config,
	pub db: Db,
}
impl NoteService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}
}

/// The wire shape of a note, shared by every operation response.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NoteView {
	pub note_id: Uuid,
	pub user_id: Uuid,
	pub title: String,
	pub content: String,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}
/// Both fields are required and must survive trimming. The title is stored
/// trimmed; content is stored verbatim so newlines come back intact.
pub(crate) fn validated_fields(title: &str, content: &str) -> Result<(String, String)> {
	let title = title.trim();

	if title.is_empty() {
		return Err(Error::Validation { field: "title".to_string() });
	}
	if content.trim().is_empty() {
		return Err(Error::Validation { field: "content".to_string() });
	}

	Ok((title.to_string(), content.to_string()))
}

impl From<Note> for NoteView {
	fn from(note: Note) -> Self {
		Self {
			note_id: note.note_id,
			user_id: note.user_id,
			title: note.title,
			content: note.content,
			created_at: note.created_at,
			updated_at: note.updated_at,
		}
	}
}
