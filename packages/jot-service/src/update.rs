use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, NoteService, NoteView, Result, Session};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
	pub note_id: Uuid,
	pub title: String,
	pub content: String,
}

impl NoteService {
	/// Overwrite title and content of an owned note. The owner filter lives
	/// in the UPDATE statement; a note owned by someone else is
	/// indistinguishable from a missing one.
	pub async fn update(&self, session: &Session, req: UpdateRequest) -> Result<NoteView> {
		let user_id = session.require_user_id()?;
		let (title, content) = crate::validated_fields(&req.title, &req.content)?;
		let note =
			jot_storage::notes::update_owned(&self.db, req.note_id, user_id, &title, &content)
				.await?;

		note.map(Into::into).ok_or_else(|| Error::NotFound {
			message: format!("Note {} not found.", req.note_id),
		})
	}
}
