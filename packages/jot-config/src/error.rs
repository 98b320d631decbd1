pub type Result<T, E = Error> = std::result::Result<T, E>;

/// One variant per stage of `load`: reading the file, parsing the TOML,
/// checking the values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read the config file at {path:?}.")]
	ReadConfig { path: std::path::PathBuf, source: std::io::Error },
	#[error("Invalid TOML in the config file at {path:?}.")]
	ParseConfig { path: std::path::PathBuf, source: toml::de::Error },
	#[error("{message}")]
	Validation { message: String },
}
