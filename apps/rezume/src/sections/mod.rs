// Keyed, ordered collections and the concrete section types built on them.

pub mod catalog;
pub mod keyed;
pub mod named;

pub use catalog::{
    AwardSet, EducationSet, ExperienceSet, InterestSet, LanguageSet, ProfileSet, PublicationSet,
    ReferenceSet, SkillSet,
};
pub use keyed::{Iter, KeyStrategy, Section};
pub use named::{NamedSection, SectionName};
