use serde::{Deserialize, Serialize};

use crate::{NoteService, NoteView, Result, Session};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
	pub notes: Vec<NoteView>,
}

impl NoteService {
	/// All notes owned by the session's user, newest first.
	pub async fn list(&self, session: &Session) -> Result<ListResponse> {
		let user_id = session.require_user_id()?;
		let notes = jot_storage::notes::list_for_user(&self.db, user_id).await?;

		Ok(ListResponse { notes: notes.into_iter().map(Into::into).collect() })
	}
}
