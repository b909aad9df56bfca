//! Whole-document schema: decodes a textual tree into typed entities.
//!
//! The same parse runs on the way in (`Rezume::load_data`) and on the way out
//! (`Rezume::dump_data` re-validates what it assembled), so a document that
//! dumps cleanly always loads cleanly.

use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;
use tracing::debug;

use crate::document::SectionSpec;
use crate::models::basics::PersonalInfo;
use crate::models::entries::{
    Award, Education, Entry, EntryKind, Experience, Language, NamedKeywords, Publication,
    Reference, Skill,
};
use crate::models::validation::{
    field_path, index_path, FieldViolation, Validate, ValidationError,
};

pub const BASICS_KEY: &str = "basics";

/// A tree that passed the schema, in registry order.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub basics: PersonalInfo,
    /// Only sections present (and non-null) in the tree.
    pub sections: Vec<(&'static str, Vec<Entry>)>,
}

impl ParsedDocument {
    /// Decodes and validates `tree` against `registry`.
    ///
    /// Collects every violation before failing. Keys not named by the
    /// registry are ignored.
    pub fn parse(tree: &Value, registry: &[SectionSpec]) -> Result<Self, ValidationError> {
        let Some(root) = tree.as_object() else {
            return Err(ValidationError::single("<root>", "expected a mapping"));
        };

        let mut report = Vec::new();

        let basics = match root.get(BASICS_KEY) {
            None | Some(Value::Null) => {
                report.push(FieldViolation::new(BASICS_KEY, "field required"));
                None
            }
            Some(value) => decode::<PersonalInfo>(value, BASICS_KEY, &mut report),
        };

        let mut sections = Vec::new();
        for spec in registry {
            match root.get(spec.name) {
                None | Some(Value::Null) => {
                    if spec.required {
                        report.push(FieldViolation::new(spec.name, "field required"));
                    }
                }
                Some(Value::Array(items)) => {
                    let entries = items
                        .iter()
                        .enumerate()
                        .filter_map(|(i, item)| {
                            decode_entry(spec.kind, item, &index_path(spec.name, i), &mut report)
                        })
                        .collect();
                    sections.push((spec.name, entries));
                }
                Some(_) => report.push(FieldViolation::new(spec.name, "expected a list")),
            }
        }

        for key in root.keys() {
            let key = key.as_str();
            if key != BASICS_KEY && !registry.iter().any(|spec| spec.name == key) {
                debug!(key = %key, "ignoring unknown top-level key");
            }
        }

        match basics {
            Some(basics) if report.is_empty() => Ok(ParsedDocument { basics, sections }),
            _ => Err(ValidationError::new(report)),
        }
    }
}

/// Deserializes one node and runs its semantic checks.
/// Returns `None` only when the node could not be decoded at all.
fn decode<T>(value: &Value, path: &str, report: &mut Vec<FieldViolation>) -> Option<T>
where
    T: DeserializeOwned + Validate,
{
    match serde_path_to_error::deserialize::<_, T>(value) {
        Ok(item) => {
            item.validate(path, report);
            Some(item)
        }
        Err(err) => {
            report.push(decode_violation(path, err));
            None
        }
    }
}

/// Places a serde failure at the field that caused it rather than at the
/// node being decoded.
fn decode_violation(
    path: &str,
    err: serde_path_to_error::Error<serde_json::Error>,
) -> FieldViolation {
    let mut at = path.to_string();
    for segment in err.path().iter() {
        match segment {
            Segment::Seq { index } => at = index_path(&at, *index),
            Segment::Map { key } => at = field_path(&at, key),
            Segment::Enum { variant } => at = field_path(&at, variant),
            _ => {}
        }
    }

    let reason = err.into_inner().to_string();
    match missing_field(&reason) {
        Some(field) => FieldViolation::new(field_path(&at, field), "field required"),
        None => FieldViolation::new(at, reason),
    }
}

/// Extracts `name` from serde's "missing field `name`" message.
fn missing_field(reason: &str) -> Option<&str> {
    reason
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
}

fn decode_entry(
    kind: EntryKind,
    value: &Value,
    path: &str,
    report: &mut Vec<FieldViolation>,
) -> Option<Entry> {
    match kind {
        EntryKind::Education => decode::<Education>(value, path, report).map(Entry::from),
        EntryKind::Experience => decode::<Experience>(value, path, report).map(Entry::from),
        EntryKind::Award => decode::<Award>(value, path, report).map(Entry::from),
        EntryKind::Publication => decode::<Publication>(value, path, report).map(Entry::from),
        EntryKind::Skill => decode::<Skill>(value, path, report).map(Entry::from),
        EntryKind::Language => decode::<Language>(value, path, report).map(Entry::from),
        EntryKind::Interest => decode::<NamedKeywords>(value, path, report).map(Entry::from),
        EntryKind::Reference => decode::<Reference>(value, path, report).map(Entry::from),
    }
}
