// Entity schema: plain records, their wire casing, and the checks that make a
// tree a valid résumé document.

pub mod basics;
pub mod entries;
pub mod schema;
pub mod validation;

pub use basics::{Location, PersonalInfo, Profile};
pub use entries::{
    Award, Education, Entry, EntryKind, Experience, Language, NamedKeywords, Publication,
    Reference, Skill,
};
pub use schema::ParsedDocument;
pub use validation::{FieldViolation, ValidationError};
