use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_REZUME_FILE: &str = "./rezume.yml";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7770;

/// Application configuration loaded from environment variables.
/// Every value has a default; CLI flags override what is read here.
#[derive(Debug, Clone)]
pub struct Config {
    pub rezume_file: PathBuf,
    pub theme: String,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rezume_file: PathBuf::from(DEFAULT_REZUME_FILE),
            theme: String::new(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => defaults.port,
        };

        Ok(Config {
            rezume_file: lookup("REZUME_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.rezume_file),
            theme: lookup("REZUME_THEME").unwrap_or(defaults.theme),
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.rezume_file, PathBuf::from("./rezume.yml"));
        assert_eq!(config.theme, "");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 7770);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_values_are_read_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("REZUME_FILE", "/tmp/cv.yml"),
            ("REZUME_THEME", "plain"),
            ("PORT", "8080"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.rezume_file, PathBuf::from("/tmp/cv.yml"));
        assert_eq!(config.theme, "plain");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "debug");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "seventy")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
