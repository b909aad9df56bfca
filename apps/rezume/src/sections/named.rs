use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::errors::RezumeError;
use crate::sections::keyed::{KeyStrategy, Section};

/// Non-empty, immutable section name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionName(String);

impl SectionName {
    pub fn new(name: impl Into<String>) -> Result<Self, RezumeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RezumeError::Configuration(
                "section name required".to_string(),
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A [`Section`] bound to a name. Derefs to the underlying section.
#[derive(Clone)]
pub struct NamedSection<T, K = T, S = K> {
    name: SectionName,
    section: Section<T, K, S>,
}

impl<T, K: Ord, S: Ord> NamedSection<T, K, S> {
    /// Fails with `RezumeError::Configuration` when `name` is blank.
    pub fn new(name: impl Into<String>, strategy: KeyStrategy<T, K, S>) -> Result<Self, RezumeError> {
        Ok(Self {
            name: SectionName::new(name)?,
            section: Section::new(strategy),
        })
    }

    pub fn name(&self) -> &SectionName {
        &self.name
    }

    pub fn into_inner(self) -> Section<T, K, S> {
        self.section
    }
}

impl<T, K, S> Deref for NamedSection<T, K, S> {
    type Target = Section<T, K, S>;

    fn deref(&self) -> &Self::Target {
        &self.section
    }
}

impl<T, K, S> DerefMut for NamedSection<T, K, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.section
    }
}

impl<T: fmt::Debug, K: Ord, S: Ord> fmt::Debug for NamedSection<T, K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedSection")
            .field("name", &self.name)
            .field("items", &self.section)
            .finish()
    }
}
