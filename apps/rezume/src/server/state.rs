use std::path::PathBuf;
use std::sync::Arc;

use crate::themes::ThemeRegistry;

/// Shared render-server state injected into handlers via Axum extractors.
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Backing document; re-read on every request so edits show up on refresh.
    pub rezume_path: Arc<PathBuf>,
    /// Theme used when a request names none. May be empty.
    pub default_theme: String,
    pub themes: Arc<ThemeRegistry>,
}

impl ServerState {
    pub fn new(
        rezume_path: impl Into<PathBuf>,
        default_theme: impl Into<String>,
        themes: ThemeRegistry,
    ) -> Self {
        Self {
            rezume_path: Arc::new(rezume_path.into()),
            default_theme: default_theme.into(),
            themes: Arc::new(themes),
        }
    }
}
