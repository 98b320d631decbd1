pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unauthorized.")]
	Unauthorized,
	#[error("{field} must be non-empty.")]
	Validation { field: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<jot_storage::Error> for Error {
	fn from(err: jot_storage::Error) -> Self {
		match err {
			jot_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			jot_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}
