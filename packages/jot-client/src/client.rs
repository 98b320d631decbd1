use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	#[error("{error_code}: {message}")]
	Api { status: u16, error_code: String, message: String },
}

/// A note as it travels over the wire. Timestamps stay RFC 3339 strings;
/// the controller never computes on them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
	pub note_id: Uuid,
	pub user_id: Uuid,
	pub title: String,
	pub content: String,
	pub created_at: String,
	pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionView {
	pub email: String,
	pub user_id: Option<Uuid>,
	pub name: Option<String>,
	pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug, Deserialize)]
struct ListBody {
	notes: Vec<Note>,
}

#[derive(Debug, Serialize)]
struct NoteFields<'a> {
	title: &'a str,
	content: &'a str,
}

#[derive(Debug, Deserialize)]
struct DeleteBody {
	note_id: Uuid,
}

/// HTTP client for the jot API. Authenticates with the session token as a
/// bearer header.
#[derive(Clone)]
pub struct ServerClient {
	client: reqwest::Client,
	base_url: Arc<str>,
	token: Arc<str>,
}
impl ServerClient {
	pub fn new(base_url: &str, token: &str) -> Self {
		Self {
			client: reqwest::Client::new(),
			base_url: Arc::from(base_url.trim_end_matches('/')),
			token: Arc::from(token),
		}
	}

	pub async fn whoami(&self) -> Result<SessionView> {
		let url = format!("{}/auth/me", self.base_url);
		let response =
			self.client.get(&url).bearer_auth(self.token.as_ref()).send().await?;

		decode(response).await
	}

	pub async fn list_notes(&self) -> Result<Vec<Note>> {
		let url = format!("{}/notes", self.base_url);
		let response =
			self.client.get(&url).bearer_auth(self.token.as_ref()).send().await?;
		let body: ListBody = decode(response).await?;

		Ok(body.notes)
	}

	pub async fn create_note(&self, title: &str, content: &str) -> Result<Note> {
		let url = format!("{}/notes", self.base_url);
		let response = self
			.client
			.post(&url)
			.bearer_auth(self.token.as_ref())
			.json(&NoteFields { title, content })
			.send()
			.await?;

		decode(response).await
	}

	pub async fn update_note(&self, note_id: Uuid, title: &str, content: &str) -> Result<Note> {
		let url = format!("{}/notes/{note_id}", self.base_url);
		let response = self
			.client
			.put(&url)
			.bearer_auth(self.token.as_ref())
			.json(&NoteFields { title, content })
			.send()
			.await?;

		decode(response).await
	}

	pub async fn delete_note(&self, note_id: Uuid) -> Result<Uuid> {
		let url = format!("{}/notes/{note_id}", self.base_url);
		let response =
			self.client.delete(&url).bearer_auth(self.token.as_ref()).send().await?;
		let body: DeleteBody = decode(response).await?;

		Ok(body.note_id)
	}
}

/// Decode a success body, or turn a non-2xx response into a typed error
/// carrying the API's error code.
async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
	let status = response.status();

	if status.is_success() {
		return Ok(response.json().await?);
	}

	let body: ApiErrorBody = response.json().await.unwrap_or(ApiErrorBody {
		error_code: "UNKNOWN".to_string(),
		message: format!("Request failed with status {status}."),
	});

	Err(Error::Api { status: status.as_u16(), error_code: body.error_code, message: body.message })
}
