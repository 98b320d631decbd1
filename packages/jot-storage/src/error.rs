#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	/// A row the caller depends on is missing.
	#[error("{0}")]
	NotFound(String),
}
