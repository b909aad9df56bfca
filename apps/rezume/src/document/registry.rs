use serde_json::Value;

use crate::errors::RezumeError;
use crate::models::{Entry, EntryKind};
use crate::sections::catalog::{
    award_section, education_section, experience_section, interest_section, language_section,
    publication_section, reference_section, skill_section,
};
use crate::sections::{
    AwardSet, EducationSet, ExperienceSet, InterestSet, LanguageSet, PublicationSet,
    ReferenceSet, SectionName, SkillSet,
};

/// One registered section: its wire name, what it holds, and whether the
/// document is incomplete without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub name: &'static str,
    pub kind: EntryKind,
    pub required: bool,
}

impl SectionSpec {
    pub const fn optional(name: &'static str, kind: EntryKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    pub const fn required(name: &'static str, kind: EntryKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }
}

pub const DEFAULT_REGISTRY: &[SectionSpec] = &[
    SectionSpec::optional("work", EntryKind::Experience),
    SectionSpec::optional("volunteer", EntryKind::Experience),
    SectionSpec::required("education", EntryKind::Education),
    SectionSpec::optional("awards", EntryKind::Award),
    SectionSpec::optional("publications", EntryKind::Publication),
    SectionSpec::optional("skills", EntryKind::Skill),
    SectionSpec::optional("languages", EntryKind::Language),
    SectionSpec::optional("interests", EntryKind::Interest),
    SectionSpec::optional("references", EntryKind::Reference),
];

/// A registered section of any kind.
#[derive(Debug, Clone)]
pub enum AnySection {
    Education(EducationSet),
    Experience(ExperienceSet),
    Award(AwardSet),
    Publication(PublicationSet),
    Skill(SkillSet),
    Language(LanguageSet),
    Interest(InterestSet),
    Reference(ReferenceSet),
}

/// Runs `$body` against the typed section inside any variant.
macro_rules! each_section {
    ($value:expr, $section:ident => $body:expr) => {
        match $value {
            AnySection::Education($section) => $body,
            AnySection::Experience($section) => $body,
            AnySection::Award($section) => $body,
            AnySection::Publication($section) => $body,
            AnySection::Skill($section) => $body,
            AnySection::Language($section) => $body,
            AnySection::Interest($section) => $body,
            AnySection::Reference($section) => $body,
        }
    };
}

impl AnySection {
    pub fn build(spec: &SectionSpec) -> Result<Self, RezumeError> {
        Ok(match spec.kind {
            EntryKind::Education => AnySection::Education(education_section(spec.name)?),
            EntryKind::Experience => AnySection::Experience(experience_section(spec.name)?),
            EntryKind::Award => AnySection::Award(award_section(spec.name)?),
            EntryKind::Publication => AnySection::Publication(publication_section(spec.name)?),
            EntryKind::Skill => AnySection::Skill(skill_section(spec.name)?),
            EntryKind::Language => AnySection::Language(language_section(spec.name)?),
            EntryKind::Interest => AnySection::Interest(interest_section(spec.name)?),
            EntryKind::Reference => AnySection::Reference(reference_section(spec.name)?),
        })
    }

    pub fn name(&self) -> &SectionName {
        each_section!(self, s => s.name())
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            AnySection::Education(_) => EntryKind::Education,
            AnySection::Experience(_) => EntryKind::Experience,
            AnySection::Award(_) => EntryKind::Award,
            AnySection::Publication(_) => EntryKind::Publication,
            AnySection::Skill(_) => EntryKind::Skill,
            AnySection::Language(_) => EntryKind::Language,
            AnySection::Interest(_) => EntryKind::Interest,
            AnySection::Reference(_) => EntryKind::Reference,
        }
    }

    pub fn len(&self) -> usize {
        each_section!(self, s => s.len())
    }

    pub fn is_empty(&self) -> bool {
        each_section!(self, s => s.is_empty())
    }

    pub fn clear(&mut self) {
        each_section!(self, s => s.clear())
    }

    /// Upserts `entry`. Fails without touching the section when the entry's
    /// kind differs from the section's.
    pub fn add(&mut self, entry: Entry) -> Result<(), RezumeError> {
        match (self, entry) {
            (AnySection::Education(s), Entry::Education(item)) => {
                s.add(item);
            }
            (AnySection::Experience(s), Entry::Experience(item)) => {
                s.add(item);
            }
            (AnySection::Award(s), Entry::Award(item)) => {
                s.add(item);
            }
            (AnySection::Publication(s), Entry::Publication(item)) => {
                s.add(item);
            }
            (AnySection::Skill(s), Entry::Skill(item)) => {
                s.add(item);
            }
            (AnySection::Language(s), Entry::Language(item)) => {
                s.add(item);
            }
            (AnySection::Interest(s), Entry::Interest(item)) => {
                s.add(item);
            }
            (AnySection::Reference(s), Entry::Reference(item)) => {
                s.add(item);
            }
            (section, entry) => return Err(section.mismatch(&entry)),
        }
        Ok(())
    }

    /// Removes the entry sharing `entry`'s key. Returns whether anything was
    /// removed; an absent key is not an error.
    pub fn discard(&mut self, entry: &Entry) -> Result<bool, RezumeError> {
        if self.kind() != entry.kind() {
            return Err(self.mismatch(entry));
        }
        let removed = match (self, entry) {
            (AnySection::Education(s), Entry::Education(item)) => s.discard(item).is_some(),
            (AnySection::Experience(s), Entry::Experience(item)) => s.discard(item).is_some(),
            (AnySection::Award(s), Entry::Award(item)) => s.discard(item).is_some(),
            (AnySection::Publication(s), Entry::Publication(item)) => s.discard(item).is_some(),
            (AnySection::Skill(s), Entry::Skill(item)) => s.discard(item).is_some(),
            (AnySection::Language(s), Entry::Language(item)) => s.discard(item).is_some(),
            (AnySection::Interest(s), Entry::Interest(item)) => s.discard(item).is_some(),
            (AnySection::Reference(s), Entry::Reference(item)) => s.discard(item).is_some(),
            _ => false,
        };
        Ok(removed)
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        match (self, entry) {
            (AnySection::Education(s), Entry::Education(item)) => s.contains(item),
            (AnySection::Experience(s), Entry::Experience(item)) => s.contains(item),
            (AnySection::Award(s), Entry::Award(item)) => s.contains(item),
            (AnySection::Publication(s), Entry::Publication(item)) => s.contains(item),
            (AnySection::Skill(s), Entry::Skill(item)) => s.contains(item),
            (AnySection::Language(s), Entry::Language(item)) => s.contains(item),
            (AnySection::Interest(s), Entry::Interest(item)) => s.contains(item),
            (AnySection::Reference(s), Entry::Reference(item)) => s.contains(item),
            _ => false,
        }
    }

    /// Entries in section order.
    pub fn entries(&self) -> Vec<Entry> {
        each_section!(self, s => s.iter().cloned().map(Entry::from).collect())
    }

    /// Entries in section order, as wire-format values.
    pub fn to_values(&self) -> Result<Vec<Value>, serde_json::Error> {
        each_section!(self, s => s.iter().map(serde_json::to_value).collect())
    }

    fn mismatch(&self, entry: &Entry) -> RezumeError {
        RezumeError::EntryMismatch {
            section: self.name().to_string(),
            expected: self.kind(),
            found: entry.kind(),
        }
    }
}
