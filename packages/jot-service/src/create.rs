use serde::{Deserialize, Serialize};

use crate::{NoteService, NoteView, Result, Session};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
	pub title: String,
	pub content: String,
}

impl NoteService {
	pub async fn create(&self, session: &Session, req: CreateRequest) -> Result<NoteView> {
		let user_id = session.require_user_id()?;
		let (title, content) = crate::validated_fields(&req.title, &req.content)?;
		let note = jot_storage::notes::insert(&self.db, user_id, &title, &content).await?;

		Ok(note.into())
	}
}

#[cfg(test)]
mod tests {
	use crate::Error;

	#[test]
	fn title_is_trimmed_and_content_kept_verbatim() {
		let (title, content) =
			crate::validated_fields("  Shopping ", "milk\neggs\n").expect("Fields must validate.");

		assert_eq!(title, "Shopping");
		assert_eq!(content, "milk\neggs\n");
	}

	#[test]
	fn empty_title_fails_validation() {
		let err = crate::validated_fields("   ", "content").expect_err("Empty title must fail.");

		assert!(matches!(err, Error::Validation { field } if field == "title"));
	}

	#[test]
	fn whitespace_content_fails_validation() {
		let err = crate::validated_fields("title", " \n\t").expect_err("Blank content must fail.");

		assert!(matches!(err, Error::Validation { field } if field == "content"));
	}
}
