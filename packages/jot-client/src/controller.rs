use uuid::Uuid;

use crate::client::{Note, ServerClient};

const LOAD_FAILED: &str = "Failed to load notes";
const CREATE_FAILED: &str = "Failed to create note";
const UPDATE_FAILED: &str = "Failed to update note";
const DELETE_FAILED: &str = "Failed to delete note";
const FIELDS_REQUIRED: &str = "Please fill in both title and content";

/// In-memory view of the current user's notes, newest first. Every mutation
/// completes server-side first; local state is reconciled from the
/// authoritative response and never touched on failure.
pub struct NotesController {
	client: ServerClient,
	notes: Vec<Note>,
	notices: Vec<String>,
}
impl NotesController {
	pub fn new(client: ServerClient) -> Self {
		Self { client, notes: Vec::new(), notices: Vec::new() }
	}

	pub fn notes(&self) -> &[Note] {
		&self.notes
	}

	/// User-visible messages, oldest first. Generic wording only; internal
	/// error detail never surfaces here.
	pub fn notices(&self) -> &[String] {
		&self.notices
	}

	pub fn take_notices(&mut self) -> Vec<String> {
		std::mem::take(&mut self.notices)
	}

	/// One full fetch on session establishment. Failure leaves the list
	/// empty and the controller usable.
	pub async fn refresh(&mut self) {
		match self.client.list_notes().await {
			Ok(notes) => self.notes = notes,
			Err(_) => {
				self.notes.clear();
				self.notices.push(LOAD_FAILED.to_string());
			},
		}
	}

	pub async fn create(&mut self, title: &str, content: &str) {
		// Local guard: an obviously invalid submit never leaves the client.
		if title.trim().is_empty() || content.trim().is_empty() {
			self.notices.push(FIELDS_REQUIRED.to_string());

			return;
		}

		match self.client.create_note(title, content).await {
			Ok(note) => self.apply_created(note),
			Err(_) => self.notices.push(CREATE_FAILED.to_string()),
		}
	}

	pub async fn update(&mut self, note_id: Uuid, title: &str, content: &str) {
		if title.trim().is_empty() || content.trim().is_empty() {
			self.notices.push(FIELDS_REQUIRED.to_string());

			return;
		}

		match self.client.update_note(note_id, title, content).await {
			Ok(note) => self.apply_updated(note),
			Err(_) => self.notices.push(UPDATE_FAILED.to_string()),
		}
	}

	pub async fn delete(&mut self, note_id: Uuid) {
		match self.client.delete_note(note_id).await {
			Ok(deleted_id) => self.apply_deleted(deleted_id),
			Err(_) => self.notices.push(DELETE_FAILED.to_string()),
		}
	}

	fn apply_created(&mut self, note: Note) {
		self.notes.insert(0, note);
	}

	fn apply_updated(&mut self, note: Note) {
		if let Some(slot) = self.notes.iter_mut().find(|entry| entry.note_id == note.note_id) {
			*slot = note;
		}
	}

	fn apply_deleted(&mut self, note_id: Uuid) {
		self.notes.retain(|entry| entry.note_id != note_id);
	}
}
