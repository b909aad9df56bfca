//! Reading and writing document trees on disk.
//!
//! YAML is the default encoding; a `.json` extension switches to JSON.
//! Writes go through a temp file in the destination directory and are
//! renamed into place, so a failed save never leaves a truncated document.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::RezumeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

pub fn parse_tree(text: &str, format: DocumentFormat) -> Result<Value, String> {
    match format {
        DocumentFormat::Yaml => serde_yaml::from_str::<Value>(text).map_err(|e| e.to_string()),
        DocumentFormat::Json => serde_json::from_str::<Value>(text).map_err(|e| e.to_string()),
    }
}

pub fn render_tree(tree: &Value, format: DocumentFormat) -> Result<String, String> {
    match format {
        DocumentFormat::Yaml => serde_yaml::to_string(tree).map_err(|e| e.to_string()),
        DocumentFormat::Json => serde_json::to_string_pretty(tree)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| e.to_string()),
    }
}

pub fn read_tree(path: &Path) -> Result<Value, RezumeError> {
    if !path.is_file() {
        return Err(RezumeError::FileNotFound(path.to_path_buf()));
    }

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            return Err(RezumeError::Format {
                path: path.to_path_buf(),
                reason: "file is not valid UTF-8".to_string(),
            })
        }
        Err(source) => {
            return Err(RezumeError::Load {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let format = DocumentFormat::from_path(path);
    debug!(path = %path.display(), ?format, bytes = text.len(), "read document");

    parse_tree(&text, format).map_err(|reason| RezumeError::Format {
        path: path.to_path_buf(),
        reason,
    })
}

/// Fails with `AlreadyExists` when `path` exists and `overwrite` is unset.
pub fn check_destination(path: &Path, overwrite: bool) -> Result<(), RezumeError> {
    if path.exists() && !overwrite {
        return Err(RezumeError::AlreadyExists(path.to_path_buf()));
    }
    Ok(())
}

/// Writes `tree` to `path` atomically.
///
/// Without `overwrite` the final rename refuses to replace a file, so a
/// document created after [`check_destination`] ran is still left alone.
pub fn write_tree(path: &Path, tree: &Value, overwrite: bool) -> Result<(), RezumeError> {
    let format = DocumentFormat::from_path(path);
    let text = render_tree(tree, format).map_err(|reason| RezumeError::Save {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, reason),
    })?;

    let save_err = |source: io::Error| RezumeError::Save {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(save_err)?;
    tmp.write_all(text.as_bytes()).map_err(save_err)?;
    tmp.as_file().sync_all().map_err(save_err)?;
    let persisted = if overwrite {
        tmp.persist(path)
    } else {
        tmp.persist_noclobber(path)
    };
    persisted.map_err(|e| match e.error.kind() {
        io::ErrorKind::AlreadyExists => RezumeError::AlreadyExists(path.to_path_buf()),
        _ => save_err(e.error),
    })?;

    debug!(path = %path.display(), ?format, bytes = text.len(), "wrote document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_format_follows_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("rezume")), DocumentFormat::Yaml);
    }

    #[test]
    fn test_yaml_dates_stay_strings() {
        let tree = parse_tree("startDate: 2020-07-05\n", DocumentFormat::Yaml).unwrap();
        assert_eq!(tree["startDate"], "2020-07-05");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_tree(&dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, RezumeError::FileNotFound(_)));
    }

    #[test]
    fn test_read_invalid_utf8_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.yml");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        assert!(matches!(read_tree(&path), Err(RezumeError::Format { .. })));
    }

    #[test]
    fn test_read_unparseable_yaml_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yml");
        fs::write(&path, "basics: [unclosed\n").unwrap();
        assert!(matches!(read_tree(&path), Err(RezumeError::Format { .. })));
    }

    #[test]
    fn test_check_destination() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rezume.yml");
        check_destination(&path, false).unwrap();

        fs::write(&path, "x").unwrap();
        assert!(matches!(
            check_destination(&path, false),
            Err(RezumeError::AlreadyExists(_))
        ));
        check_destination(&path, true).unwrap();
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let tree = json!({"basics": {"name": "John"}, "skills": [{"name": "Rust"}]});

        for name in ["out.yml", "out.json"] {
            let path = dir.path().join(name);
            write_tree(&path, &tree, false).unwrap();
            assert_eq!(read_tree(&path).unwrap(), tree);
        }
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing/out.yml");
        assert!(matches!(
            write_tree(&path, &json!({}), true),
            Err(RezumeError::Save { .. })
        ));
    }

    #[test]
    fn test_write_without_overwrite_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rezume.yml");
        fs::write(&path, "keep me").unwrap();

        assert!(matches!(
            write_tree(&path, &json!({"basics": {}}), false),
            Err(RezumeError::AlreadyExists(_))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

        write_tree(&path, &json!({"basics": {}}), true).unwrap();
        assert_eq!(read_tree(&path).unwrap(), json!({"basics": {}}));
    }
}
