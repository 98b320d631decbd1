use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, NoteService, Result, Session};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
	pub note_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
	pub note_id: Uuid,
}

impl NoteService {
	/// Remove an owned note. Deleting an id that is already gone is
	/// NotFound, not success.
	pub async fn delete(&self, session: &Session, req: DeleteRequest) -> Result<DeleteResponse> {
		let user_id = session.require_user_id()?;
		let deleted = jot_storage::notes::delete_owned(&self.db, req.note_id, user_id).await?;

		deleted.map(|note_id| DeleteResponse { note_id }).ok_or_else(|| Error::NotFound {
			message: format!("Note {} not found.", req.note_id),
		})
	}
}
