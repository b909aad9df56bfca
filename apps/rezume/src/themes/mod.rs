//! Themes: named renderers that turn a loaded `Rezume` into a page.
//!
//! The host process populates a [`ThemeRegistry`] at startup and hands it to
//! the render server as `Arc<ThemeRegistry>`. Looking up an unknown name is
//! not an error; the server falls back to the raw JSON dump.

pub mod json;
pub mod plain;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::document::Rezume;
use crate::errors::RezumeError;

pub use json::JsonTheme;
pub use plain::PlainTheme;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A résumé renderer. Implement this to add a theme without touching the
/// server or CLI.
pub trait Theme: Send + Sync {
    fn name(&self) -> &str;

    fn content_type(&self) -> &'static str {
        HTML_CONTENT_TYPE
    }

    fn render(&self, rezume: &Rezume) -> Result<String, RezumeError>;
}

#[derive(Default, Clone)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Arc<dyn Theme>>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the `json` and `plain` themes.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonTheme));
        registry.register(Arc::new(PlainTheme));
        registry
    }

    /// Adds `theme` under its own name, replacing any theme of that name.
    pub fn register(&mut self, theme: Arc<dyn Theme>) {
        self.themes.insert(theme.name().to_string(), theme);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Theme>> {
        self.themes.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
