use crate::document::Rezume;
use crate::errors::RezumeError;
use crate::themes::Theme;

/// Renders the validated wire tree as compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTheme;

impl Theme for JsonTheme {
    fn name(&self) -> &str {
        "json"
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, rezume: &Rezume) -> Result<String, RezumeError> {
        let tree = rezume.dump_data()?;
        Ok(serde_json::to_string(&tree)?)
    }
}
