//! Field-level schema checks shared by every entity.
//!
//! Structural problems (missing fields, wrong types) are reported by serde while
//! decoding; the checks here cover what serde cannot express: blank required
//! text, email format and http(s) URLs. Violations are collected, never
//! short-circuited, so a single pass reports everything wrong with a document.
//!
//! Text fields that hand-written YAML often leaves unquoted, such as postal
//! codes and phone numbers, decode through [`text_or_number`].

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use url::Url;

/// One schema violation: where it happened and which constraint failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted path into the document, e.g. `basics.location.region` or `work[1].website`.
    pub path: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Structured schema failure holding every violation found in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} validation error(s): {}", .violations.len(), join_violations(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn single(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(vec![FieldViolation::new(path, reason)])
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// True if any violation is reported at exactly `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Semantic checks run after an entity has been decoded.
pub trait Validate {
    /// Appends every violation found under `path` to `report`.
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>);
}

/// Joins a parent path and a field name.
pub fn field_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Joins a parent path and a list index.
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Integer(n) => n.to_string(),
            TextOrNumber::Unsigned(n) => n.to_string(),
            TextOrNumber::Float(f) => f.to_string(),
        }
    }
}

/// Accepts `700214` as well as `"KN 700214"`; stored as text either way.
pub fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(TextOrNumber::into_text)
}

/// Optional form of [`text_or_number`]; pair it with `#[serde(default)]`.
pub fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(TextOrNumber::into_text))
}

pub fn require_text(parent: &str, field: &str, value: &str, report: &mut Vec<FieldViolation>) {
    if value.trim().is_empty() {
        report.push(FieldViolation::new(
            field_path(parent, field),
            "field must not be blank",
        ));
    }
}

pub fn check_email(parent: &str, field: &str, value: &str, report: &mut Vec<FieldViolation>) {
    if !is_valid_email(value) {
        report.push(FieldViolation::new(
            field_path(parent, field),
            "value is not a valid email address",
        ));
    }
}

pub fn check_http_url(parent: &str, field: &str, value: &str, report: &mut Vec<FieldViolation>) {
    if !is_http_url(value) {
        report.push(FieldViolation::new(
            field_path(parent, field),
            "value is not a valid http(s) URL",
        ));
    }
}

pub fn check_optional_url(
    parent: &str,
    field: &str,
    value: Option<&str>,
    report: &mut Vec<FieldViolation>,
) {
    if let Some(value) = value {
        check_http_url(parent, field, value, report);
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value.trim())
}

pub fn is_http_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
