use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::cli::Outcome;
use crate::server::{self, ServerState};
use crate::themes::ThemeRegistry;

#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub path: PathBuf,
    pub theme: String,
    pub host: String,
    pub port: u16,
}

/// Runs the render server for `options.path` until the process is stopped.
/// Fails early, without binding, when the file does not exist.
pub async fn run(options: ServeOptions, out: &mut impl Write) -> Result<Outcome> {
    if !options.path.is_file() {
        writeln!(out, "Rezume not found: {}", options.path.display())?;
        return Ok(Outcome::Failure);
    }

    let themes = ThemeRegistry::with_builtin();
    info!(
        file = %options.path.display(),
        theme = %options.theme,
        available = ?themes.names().collect::<Vec<_>>(),
        "starting render server"
    );

    let state = ServerState::new(options.path, options.theme, themes);
    server::serve(state, &options.host, options.port).await?;
    Ok(Outcome::Success)
}
