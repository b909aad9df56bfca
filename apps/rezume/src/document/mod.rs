//! Document aggregate: personal details plus a fixed registry of named sections.
//!
//! # Guarantees
//! - Every registered section exists from construction on, empty until filled.
//! - Item operations name their section; unknown names fail with
//!   `RezumeError::SectionNotFound`.
//! - `load_data`, `load` and every item operation either fully succeed or
//!   leave the aggregate untouched.
//! - `dump_data` re-validates what it assembled, so it refuses to emit an
//!   incomplete document (e.g. after the last education entry was discarded).

pub mod registry;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::RezumeError;
use crate::models::schema::BASICS_KEY;
use crate::models::{Entry, Location, ParsedDocument, PersonalInfo, Profile};
use crate::persist;
use crate::sections::catalog::profile_set;
use crate::sections::ProfileSet;

pub use registry::{AnySection, SectionSpec, DEFAULT_REGISTRY};

/// What `Rezume::validate` checks: a file on disk or an in-memory tree.
#[derive(Debug, Clone)]
pub enum Source {
    Path(PathBuf),
    Data(Value),
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl From<Value> for Source {
    fn from(data: Value) -> Self {
        Source::Data(data)
    }
}

#[derive(Debug, Clone)]
pub struct Rezume {
    pub name: Option<String>,
    pub label: Option<String>,
    pub email: Option<String>,
    pub location: Option<Location>,
    pub phone: Option<String>,
    pub picture: Option<String>,
    pub summary: Option<String>,
    pub website: Option<String>,
    profiles: ProfileSet,
    sections: Vec<AnySection>,
    registry: Vec<SectionSpec>,
}

/// Wire view of the scalar fields; absent values are omitted.
#[derive(Serialize)]
struct BasicsView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    picture: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    website: Option<&'a str>,
    profiles: Vec<&'a Profile>,
}

impl Default for Rezume {
    fn default() -> Self {
        Self::new()
    }
}

impl Rezume {
    /// An empty aggregate over [`DEFAULT_REGISTRY`].
    pub fn new() -> Self {
        Self::with_registry(DEFAULT_REGISTRY).expect("default registry is well-formed")
    }

    /// An empty aggregate over a custom registry.
    /// Blank or duplicate section names are configuration errors.
    pub fn with_registry(registry: &[SectionSpec]) -> Result<Self, RezumeError> {
        let mut sections: Vec<AnySection> = Vec::with_capacity(registry.len());
        for spec in registry {
            if sections.iter().any(|s| s.name().as_str() == spec.name) {
                return Err(RezumeError::Configuration(format!(
                    "duplicate section name: {}",
                    spec.name
                )));
            }
            sections.push(AnySection::build(spec)?);
        }

        Ok(Self {
            name: None,
            label: None,
            email: None,
            location: None,
            phone: None,
            picture: None,
            summary: None,
            website: None,
            profiles: profile_set()?,
            sections,
            registry: registry.to_vec(),
        })
    }

    // ────────────────────────────────────────────────────────────────────────
    // Section access
    // ────────────────────────────────────────────────────────────────────────

    pub fn registry(&self) -> &[SectionSpec] {
        &self.registry
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    pub fn profiles_mut(&mut self) -> &mut ProfileSet {
        &mut self.profiles
    }

    /// Registered sections in registry order.
    pub fn sections(&self) -> impl Iterator<Item = &AnySection> {
        self.sections.iter()
    }

    /// Number of registered sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, name: &str) -> Option<&AnySection> {
        self.sections.iter().find(|s| s.name().as_str() == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut AnySection> {
        self.sections.iter_mut().find(|s| s.name().as_str() == name)
    }

    fn resolve(&mut self, name: &str) -> Result<&mut AnySection, RezumeError> {
        if name.is_empty() {
            return Err(RezumeError::SectionNotFound("<empty>".to_string()));
        }
        self.section_mut(name)
            .ok_or_else(|| RezumeError::SectionNotFound(name.to_string()))
    }

    // ────────────────────────────────────────────────────────────────────────
    // Section-scoped mutation
    // ────────────────────────────────────────────────────────────────────────

    pub fn add_item(&mut self, section_name: &str, item: impl Into<Entry>) -> Result<(), RezumeError> {
        let entry = item.into();
        let kind = entry.kind();
        self.resolve(section_name)?.add(entry)?;
        debug!(section = section_name, kind = %kind, "item added");
        Ok(())
    }

    /// Discarding an entry that is not in the section is a no-op.
    pub fn discard_item(&mut self, section_name: &str, item: &Entry) -> Result<(), RezumeError> {
        let removed = self.resolve(section_name)?.discard(item)?;
        debug!(section = section_name, removed, "item discarded");
        Ok(())
    }

    pub fn clear_section(&mut self, section_name: &str) -> Result<(), RezumeError> {
        self.resolve(section_name)?.clear();
        Ok(())
    }

    /// Empties scalars, profiles and every section; the registry is kept.
    pub fn clear(&mut self) {
        self.name = None;
        self.label = None;
        self.email = None;
        self.location = None;
        self.phone = None;
        self.picture = None;
        self.summary = None;
        self.website = None;
        self.profiles.clear();
        for section in &mut self.sections {
            section.clear();
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Trees
    // ────────────────────────────────────────────────────────────────────────

    /// Replaces the whole document with `tree`.
    ///
    /// The tree is fully parsed and validated before anything is touched; on
    /// failure the aggregate keeps its previous contents.
    pub fn load_data(&mut self, tree: &Value) -> Result<&mut Self, RezumeError> {
        let parsed = ParsedDocument::parse(tree, &self.registry)?;

        let mut fresh = Self::with_registry(&self.registry)?;
        fresh.apply(parsed)?;
        *self = fresh;

        debug!(
            profiles = self.profiles.len(),
            sections = self.sections.iter().filter(|s| !s.is_empty()).count(),
            "rezume data loaded"
        );
        Ok(self)
    }

    fn apply(&mut self, parsed: ParsedDocument) -> Result<(), RezumeError> {
        let PersonalInfo {
            name,
            label,
            email,
            location,
            phone,
            picture,
            summary,
            website,
            profiles,
        } = parsed.basics;

        self.name = Some(name);
        self.label = Some(label);
        self.email = Some(email);
        self.location = Some(location);
        self.phone = phone;
        self.picture = picture;
        self.summary = summary;
        self.website = website;
        self.profiles.extend(profiles);

        for (section_name, entries) in parsed.sections {
            let section = self.resolve(section_name)?;
            for entry in entries {
                section.add(entry)?;
            }
        }
        Ok(())
    }

    /// Assembles the wire tree: `basics` (scalars + profiles) and every
    /// non-empty section, then validates it against the schema.
    pub fn dump_data(&self) -> Result<Value, RezumeError> {
        let basics = BasicsView {
            name: self.name.as_deref(),
            label: self.label.as_deref(),
            email: self.email.as_deref(),
            location: self.location.as_ref(),
            phone: self.phone.as_deref(),
            picture: self.picture.as_deref(),
            summary: self.summary.as_deref(),
            website: self.website.as_deref(),
            profiles: self.profiles.iter().collect(),
        };

        let mut root = serde_json::Map::new();
        root.insert(BASICS_KEY.to_string(), serde_json::to_value(basics)?);
        for section in self.sections.iter().filter(|s| !s.is_empty()) {
            root.insert(
                section.name().to_string(),
                Value::Array(section.to_values()?),
            );
        }

        let tree = Value::Object(root);
        if let Err(err) = ParsedDocument::parse(&tree, &self.registry) {
            warn!("rezume failed validation on dump: {err}");
            return Err(err.into());
        }
        Ok(tree)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Files
    // ────────────────────────────────────────────────────────────────────────

    /// Loads the document stored at `path` (YAML, or JSON for `.json`).
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, RezumeError> {
        let path = path.as_ref();
        let tree = persist::read_tree(path)?;

        match self.load_data(&tree) {
            Ok(_) => {}
            Err(RezumeError::Validation(err)) => {
                return Err(RezumeError::Format {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                })
            }
            Err(other) => return Err(other),
        }

        info!(path = %path.display(), "rezume loaded");
        Ok(self)
    }

    /// Writes the document to `path`. An existing file is only replaced when
    /// `overwrite` is set.
    pub fn save(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<(), RezumeError> {
        let path = path.as_ref();
        persist::check_destination(path, overwrite)?;

        let tree = self.dump_data()?;
        persist::write_tree(path, &tree, overwrite)?;

        info!(path = %path.display(), "rezume saved");
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Validation shortcuts
    // ────────────────────────────────────────────────────────────────────────

    /// Loads `source` into a throwaway aggregate and reports the first failure.
    pub fn validate(source: impl Into<Source>) -> Result<(), RezumeError> {
        let mut rezume = Rezume::new();
        match source.into() {
            Source::Path(path) => rezume.load(path).map(|_| ()),
            Source::Data(data) => rezume.load_data(&data).map(|_| ()),
        }
    }

    pub fn is_valid(source: impl Into<Source>) -> bool {
        Self::validate(source).is_ok()
    }
}
