pub mod db;
pub mod models;
pub mod notes;
pub mod schema;
pub mod users;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
