//! Rezume: a résumé kept as a YAML document.
//!
//! [`Rezume`] is the in-memory aggregate: personal details plus named,
//! keyed sections (work, education, skills, ...) that deduplicate and order
//! their entries. It loads from and saves to YAML or JSON files, validating
//! against the document schema on the way in and on the way out. The CLI and
//! the local render server are thin collaborators on top of it.

pub mod cli;
pub mod config;
pub mod document;
pub mod errors;
pub mod models;
pub mod persist;
pub mod sections;
pub mod server;
pub mod themes;

pub use document::{Rezume, Source};
pub use errors::{AppError, RezumeError};
