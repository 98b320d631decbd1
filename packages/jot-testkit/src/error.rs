pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A rendered failure message. The testkit only ever reports errors, never
/// matches on them.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Error(pub String);
