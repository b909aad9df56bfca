use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::validation::{
    check_optional_url, optional_text_or_number, require_text, FieldViolation, Validate,
};

pub const DEFAULT_STUDY_TYPE: &str = "Bachelor";
pub const DEFAULT_LANGUAGE: &str = "English";

fn default_study_type() -> String {
    DEFAULT_STUDY_TYPE.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Timelined entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    #[serde(alias = "study_area", alias = "area")]
    pub study_area: String,
    #[serde(default = "default_study_type", alias = "study_type")]
    pub study_type: String,
    #[serde(alias = "start_date")]
    pub start_date: NaiveDate,
    #[serde(default, alias = "end_date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<String>>,
}

impl Education {
    pub fn new(
        institution: impl Into<String>,
        study_area: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            institution: institution.into(),
            study_area: study_area.into(),
            study_type: default_study_type(),
            start_date,
            end_date: None,
            gpa: None,
            courses: None,
        }
    }
}

impl Validate for Education {
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>) {
        require_text(path, "institution", &self.institution, report);
        require_text(path, "studyArea", &self.study_area, report);
        require_text(path, "studyType", &self.study_type, report);
    }
}

/// Work-related or volunteer experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(alias = "company", alias = "name")]
    pub organization: String,
    pub position: String,
    #[serde(default, alias = "start_date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, alias = "end_date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
}

impl Experience {
    pub fn new(
        organization: impl Into<String>,
        position: impl Into<String>,
        start_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            organization: organization.into(),
            position: position.into(),
            start_date,
            end_date: None,
            website: None,
            summary: None,
            highlights: None,
        }
    }
}

impl Validate for Experience {
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>) {
        require_text(path, "organization", &self.organization, report);
        require_text(path, "position", &self.position, report);
        check_optional_url(path, "website", self.website.as_deref(), report);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awarder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Validate for Award {
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>) {
        require_text(path, "title", &self.title, report);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, alias = "release_date", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Validate for Publication {
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>) {
        require_text(path, "name", &self.name, report);
        check_optional_url(path, "website", self.website.as_deref(), report);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Named entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default = "default_language", alias = "name")]
    pub language: String,
    pub fluency: String,
}

impl Language {
    pub fn new(language: impl Into<String>, fluency: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            fluency: fluency.into(),
        }
    }
}

impl Validate for Language {
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>) {
        require_text(path, "language", &self.language, report);
        require_text(path, "fluency", &self.fluency, report);
    }
}

/// A name with an optional list of keywords; used for interests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedKeywords {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl NamedKeywords {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keywords: None,
        }
    }
}

impl Validate for NamedKeywords {
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>) {
        require_text(path, "name", &self.name, report);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
            keywords: None,
        }
    }
}

impl Validate for Skill {
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>) {
        require_text(path, "name", &self.name, report);
        require_text(path, "level", &self.level, report);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Validate for Reference {
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>) {
        require_text(path, "name", &self.name, report);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry: closed sum of everything a section can hold
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Education,
    Experience,
    Award,
    Publication,
    Skill,
    Language,
    Interest,
    Reference,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Education => "education",
            EntryKind::Experience => "experience",
            EntryKind::Award => "award",
            EntryKind::Publication => "publication",
            EntryKind::Skill => "skill",
            EntryKind::Language => "language",
            EntryKind::Interest => "interest",
            EntryKind::Reference => "reference",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Education(Education),
    Experience(Experience),
    Award(Award),
    Publication(Publication),
    Skill(Skill),
    Language(Language),
    Interest(NamedKeywords),
    Reference(Reference),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Education(_) => EntryKind::Education,
            Entry::Experience(_) => EntryKind::Experience,
            Entry::Award(_) => EntryKind::Award,
            Entry::Publication(_) => EntryKind::Publication,
            Entry::Skill(_) => EntryKind::Skill,
            Entry::Language(_) => EntryKind::Language,
            Entry::Interest(_) => EntryKind::Interest,
            Entry::Reference(_) => EntryKind::Reference,
        }
    }

    /// One-line human summary, used by text themes.
    pub fn headline(&self) -> String {
        match self {
            Entry::Education(e) => format!(
                "{}, {} at {} ({})",
                e.study_type,
                e.study_area,
                e.institution,
                span(Some(e.start_date), e.end_date)
            ),
            Entry::Experience(e) => {
                format!("{} at {} ({})", e.position, e.organization, span(e.start_date, e.end_date))
            }
            Entry::Award(a) => match &a.awarder {
                Some(awarder) => format!("{} from {}", a.title, awarder),
                None => a.title.clone(),
            },
            Entry::Publication(p) => match &p.publisher {
                Some(publisher) => format!("{} ({})", p.name, publisher),
                None => p.name.clone(),
            },
            Entry::Skill(s) => with_keywords(&format!("{} [{}]", s.name, s.level), &s.keywords),
            Entry::Language(l) => format!("{}: {}", l.language, l.fluency),
            Entry::Interest(i) => with_keywords(&i.name, &i.keywords),
            Entry::Reference(r) => match &r.reference {
                Some(text) => format!("{}: {}", r.name, text),
                None => r.name.clone(),
            },
        }
    }
}

fn span(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let start = start
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_else(|| "?".to_string());
    let end = end
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_else(|| "present".to_string());
    format!("{start} to {end}")
}

fn with_keywords(head: &str, keywords: &Option<Vec<String>>) -> String {
    match keywords {
        Some(keywords) if !keywords.is_empty() => format!("{head}: {}", keywords.join(", ")),
        _ => head.to_string(),
    }
}

macro_rules! entry_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Entry {
                fn from(item: $ty) -> Self {
                    Entry::$variant(item)
                }
            }
        )*
    };
}

entry_from!(
    Education(Education),
    Experience(Experience),
    Award(Award),
    Publication(Publication),
    Skill(Skill),
    Language(Language),
    Interest(NamedKeywords),
    Reference(Reference),
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_education_defaults_and_aliases() {
        let snake: Education = serde_json::from_value(json!({
            "institution": "University",
            "study_area": "Software Engineering",
            "start_date": "2020-07-05"
        }))
        .unwrap();
        let camel: Education = serde_json::from_value(json!({
            "institution": "University",
            "studyArea": "Software Engineering",
            "startDate": "2020-07-05"
        }))
        .unwrap();
        let short: Education = serde_json::from_value(json!({
            "institution": "University",
            "area": "Software Engineering",
            "startDate": "2020-07-05"
        }))
        .unwrap();

        assert_eq!(snake, camel);
        assert_eq!(camel, short);
        assert_eq!(snake.study_type, "Bachelor");
        assert_eq!(snake.start_date, date(2020, 7, 5));
    }

    #[test]
    fn test_education_serializes_camel_case_without_absent_fields() {
        let edu = Education::new("University", "Software Engineering", date(2020, 7, 5));
        let out = serde_json::to_value(&edu).unwrap();
        assert_eq!(out["studyArea"], "Software Engineering");
        assert_eq!(out["startDate"], "2020-07-05");
        assert!(out.get("endDate").is_none());
        assert!(out.get("gpa").is_none());
    }

    #[test]
    fn test_gpa_accepts_number_or_text() {
        let numeric: Education = serde_json::from_value(json!({
            "institution": "U", "area": "CS", "startDate": "2019-09-01", "gpa": 3.5
        }))
        .unwrap();
        let text: Education = serde_json::from_value(json!({
            "institution": "U", "area": "CS", "startDate": "2019-09-01", "gpa": "4.5/5.0"
        }))
        .unwrap();
        assert_eq!(numeric.gpa.as_deref(), Some("3.5"));
        assert_eq!(text.gpa.as_deref(), Some("4.5/5.0"));
    }

    #[test]
    fn test_experience_accepts_company_alias() {
        let exp: Experience = serde_json::from_value(json!({
            "company": "Acme", "position": "Engineer", "startDate": "2021-03-01"
        }))
        .unwrap();
        assert_eq!(exp.organization, "Acme");
        assert_eq!(exp.start_date, Some(date(2021, 3, 1)));
    }

    #[test]
    fn test_bad_date_fails_to_decode() {
        let result = serde_json::from_value::<Education>(json!({
            "institution": "U", "area": "CS", "startDate": "yesterday"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_language_defaults_to_english() {
        let lang: Language = serde_json::from_value(json!({"fluency": "Native"})).unwrap();
        assert_eq!(lang.language, "English");
    }

    #[test]
    fn test_experience_website_must_be_http() {
        let mut exp = Experience::new("Acme", "Engineer", None);
        exp.website = Some("acme".to_string());
        let mut report = Vec::new();
        exp.validate("work[0]", &mut report);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].path, "work[0].website");
    }

    #[test]
    fn test_entry_kind_and_headline() {
        let entry = Entry::from(Skill::new("Rust", "Advanced"));
        assert_eq!(entry.kind(), EntryKind::Skill);
        assert_eq!(entry.headline(), "Rust [Advanced]");

        let exp = Entry::from(Experience::new("Acme", "Engineer", Some(date(2021, 3, 1))));
        assert_eq!(exp.headline(), "Engineer at Acme (2021-03 to present)");
    }
}
