use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use jot_service::{
	CreateRequest, DeleteRequest, DeleteResponse, Error as ServiceError, ListResponse, NoteView,
	UpdateRequest,
};

use crate::auth;
use crate::extract::Session;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/notes", get(list_notes).post(create_note))
		.route("/notes/{id}", put(update_note).delete(delete_note))
		.route("/auth/{provider}/login", get(auth::login))
		.route("/auth/{provider}/callback", get(auth::callback))
		.route("/auth/me", get(auth::whoami))
		.route("/auth/logout", post(auth::logout))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_notes(
	State(state): State<AppState>,
	Session(session): Session,
) -> Result<Json<ListResponse>, ApiError> {
	let response = state.service.list(&session).await?;

	Ok(Json(response))
}

async fn create_note(
	State(state): State<AppState>,
	Session(session): Session,
	Json(payload): Json<CreateRequest>,
) -> Result<Json<NoteView>, ApiError> {
	let response = state.service.create(&session, payload).await?;

	Ok(Json(response))
}

#[derive(Debug, serde::Deserialize)]
pub struct NoteFields {
	pub title: String,
	pub content: String,
}

async fn update_note(
	State(state): State<AppState>,
	Session(session): Session,
	Path(note_id): Path<Uuid>,
	Json(payload): Json<NoteFields>,
) -> Result<Json<NoteView>, ApiError> {
	let request =
		UpdateRequest { note_id, title: payload.title, content: payload.content };
	let response = state.service.update(&session, request).await?;

	Ok(Json(response))
}

async fn delete_note(
	State(state): State<AppState>,
	Session(session): Session,
	Path(note_id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
	let response = state.service.delete(&session, DeleteRequest { note_id }).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::Unauthorized =>
				json_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Unauthorized.", None),
			ServiceError::Validation { field } => json_error(
				StatusCode::UNPROCESSABLE_ENTITY,
				"VALIDATION",
				format!("{field} must be non-empty."),
				Some(vec![field]),
			),
			ServiceError::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			ServiceError::Provider { .. } => json_error(
				StatusCode::UNAUTHORIZED,
				"SIGNIN_REJECTED",
				"Sign-in was rejected.",
				None,
			),
			// Storage detail stays in the logs.
			ServiceError::Storage { .. } => json_error(
				StatusCode::INTERNAL_SERVER_ERROR,
				"STORAGE",
				"Storage operation failed.",
				None,
			),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody {
			error_code: self.error_code,
			message: self.message,
			fields: self.fields,
		};

		(self.status, Json(body)).into_response()
	}
}
