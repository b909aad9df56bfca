use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::validation::ValidationError;
use crate::models::EntryKind;

/// Document-level error type.
/// Every fallible operation on sections, the aggregate and the persistence
/// adapter returns `Result<T, RezumeError>`.
#[derive(Debug, Error)]
pub enum RezumeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid file format: {}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("File already exists, set overwrite if intended: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Section '{section}' holds {expected} entries, got {found}")]
    EntryMismatch {
        section: String,
        expected: EntryKind,
        found: EntryKind,
    },

    #[error("Load operation failed: {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Save operation failed: {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RezumeError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            RezumeError::Configuration(_) => "CONFIGURATION_ERROR",
            RezumeError::SectionNotFound(_) | RezumeError::FileNotFound(_) => "NOT_FOUND",
            RezumeError::Format { .. } => "INVALID_FORMAT",
            RezumeError::Validation(_) => "VALIDATION_ERROR",
            RezumeError::AlreadyExists(_) => "ALREADY_EXISTS",
            RezumeError::EntryMismatch { .. } => "ENTRY_MISMATCH",
            RezumeError::Load { .. } | RezumeError::Save { .. } => "IO_ERROR",
            RezumeError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

/// Render server error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Rezume(#[from] RezumeError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Document failures all surface as 500.
        let (code, message) = match &self {
            AppError::Rezume(e) => {
                tracing::error!("Rezume error: {e}");
                (e.code(), e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
