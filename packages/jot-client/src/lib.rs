mod client;
mod controller;

pub use client::{Error, Note, Result, ServerClient, SessionView};
pub use controller::NotesController;
