use std::path::Path;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::document::Rezume;
use crate::errors::{AppError, RezumeError};
use crate::server::state::ServerState;
use crate::themes::Theme;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    pub theme: Option<String>,
}

struct Page {
    content_type: &'static str,
    body: String,
}

/// GET /
/// Renders the backing document with the requested (or default) theme, or
/// returns its JSON dump when no such theme is registered.
pub async fn handle_index(
    State(state): State<ServerState>,
    Query(params): Query<RenderQuery>,
) -> Result<Response, AppError> {
    let theme_name = params
        .theme
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| state.default_theme.clone());

    let theme = state.themes.get(&theme_name);
    if theme.is_none() && !theme_name.is_empty() {
        debug!(theme = %theme_name, "theme not registered, serving json");
    }

    let path = state.rezume_path.clone();
    let page = tokio::task::spawn_blocking(move || render_page(&path, theme.as_deref()))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    Ok(([(header::CONTENT_TYPE, page.content_type)], page.body).into_response())
}

fn render_page(path: &Path, theme: Option<&dyn Theme>) -> Result<Page, RezumeError> {
    let mut rezume = Rezume::new();
    rezume.load(path)?;

    match theme {
        Some(theme) => Ok(Page {
            content_type: theme.content_type(),
            body: theme.render(&rezume)?,
        }),
        None => Ok(Page {
            content_type: JSON_CONTENT_TYPE,
            body: serde_json::to_string(&rezume.dump_data()?)?,
        }),
    }
}

/// GET /health
pub async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME")
    }))
}
