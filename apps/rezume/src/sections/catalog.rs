//! Concrete identity and ordering rules for every résumé section.

use chrono::NaiveDate;

use crate::errors::RezumeError;
use crate::models::{
    Award, Education, Experience, Language, NamedKeywords, Profile, Publication, Reference, Skill,
};
use crate::sections::keyed::KeyStrategy;
use crate::sections::named::NamedSection;

/// Sections iterated newest first by start date.
pub type Timeline<T> = NamedSection<T, String, Option<NaiveDate>>;

pub type EducationSet = Timeline<Education>;
pub type ExperienceSet = Timeline<Experience>;
pub type AwardSet = Timeline<Award>;
pub type PublicationSet = Timeline<Publication>;
pub type SkillSet = NamedSection<Skill, String>;
pub type LanguageSet = NamedSection<Language, String>;
pub type InterestSet = NamedSection<NamedKeywords, String>;
pub type ReferenceSet = NamedSection<Reference, String>;
pub type ProfileSet = NamedSection<Profile, String>;

pub const PROFILES_SECTION: &str = "profiles";

// ────────────────────────────────────────────────────────────────────────────
// Identity keys
// ────────────────────────────────────────────────────────────────────────────

pub fn education_key(item: &Education) -> String {
    format!(
        "{}:{}:{}",
        item.institution, item.study_area, item.study_type
    )
}

/// Same organization and position started in different months are distinct
/// roles; without a start date they collapse to one.
pub fn experience_key(item: &Experience) -> String {
    let mut key = format!("{}:{}", item.organization, item.position);
    if let Some(start) = item.start_date {
        key.push(':');
        key.push_str(&start.format("%Y%m").to_string());
    }
    key
}

pub fn award_key(item: &Award) -> String {
    match item.date {
        Some(date) => format!("{}:{}", item.title, date.format("%Y%m%d")),
        None => item.title.clone(),
    }
}

pub fn publication_key(item: &Publication) -> String {
    item.name.clone()
}

pub fn language_key(item: &Language) -> String {
    item.language.clone()
}

pub fn skill_key(item: &Skill) -> String {
    item.name.clone()
}

pub fn interest_key(item: &NamedKeywords) -> String {
    item.name.clone()
}

pub fn reference_key(item: &Reference) -> String {
    item.name.clone()
}

pub fn profile_key(item: &Profile) -> String {
    item.network.clone()
}

// ────────────────────────────────────────────────────────────────────────────
// Constructors
// ────────────────────────────────────────────────────────────────────────────

pub fn education_section(name: &str) -> Result<EducationSet, RezumeError> {
    NamedSection::new(
        name,
        KeyStrategy::new(education_key, |item: &Education| Some(item.start_date)).descending(),
    )
}

pub fn experience_section(name: &str) -> Result<ExperienceSet, RezumeError> {
    NamedSection::new(
        name,
        KeyStrategy::new(experience_key, |item: &Experience| item.start_date).descending(),
    )
}

pub fn award_section(name: &str) -> Result<AwardSet, RezumeError> {
    NamedSection::new(
        name,
        KeyStrategy::new(award_key, |item: &Award| item.date).descending(),
    )
}

pub fn publication_section(name: &str) -> Result<PublicationSet, RezumeError> {
    NamedSection::new(
        name,
        KeyStrategy::new(publication_key, |item: &Publication| item.release_date).descending(),
    )
}

pub fn skill_section(name: &str) -> Result<SkillSet, RezumeError> {
    NamedSection::new(name, KeyStrategy::by_key(skill_key))
}

pub fn language_section(name: &str) -> Result<LanguageSet, RezumeError> {
    NamedSection::new(name, KeyStrategy::by_key(language_key))
}

pub fn interest_section(name: &str) -> Result<InterestSet, RezumeError> {
    NamedSection::new(name, KeyStrategy::by_key(interest_key))
}

pub fn reference_section(name: &str) -> Result<ReferenceSet, RezumeError> {
    NamedSection::new(name, KeyStrategy::by_key(reference_key))
}

pub fn profile_set() -> Result<ProfileSet, RezumeError> {
    NamedSection::new(PROFILES_SECTION, KeyStrategy::by_key(profile_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_education_key_is_colon_joined() {
        let edu = Education::new("University", "Software Engineering", date(2020, 7, 5));
        assert_eq!(
            education_key(&edu),
            "University:Software Engineering:Bachelor"
        );
    }

    #[test]
    fn test_experience_key_includes_start_month() {
        let dated = Experience::new("Acme", "Engineer", Some(date(2021, 3, 14)));
        let undated = Experience::new("Acme", "Engineer", None);
        assert_eq!(experience_key(&dated), "Acme:Engineer:202103");
        assert_eq!(experience_key(&undated), "Acme:Engineer");
    }

    #[test]
    fn test_same_role_different_start_months_are_distinct() {
        let mut work = experience_section("work").unwrap();
        work.add(Experience::new("Acme", "Engineer", Some(date(2019, 1, 1))));
        work.add(Experience::new("Acme", "Engineer", Some(date(2021, 6, 1))));
        work.add(Experience::new("Acme", "Engineer", Some(date(2021, 6, 20))));
        assert_eq!(work.len(), 2);

        let mut undated = experience_section("volunteer").unwrap();
        undated.add(Experience::new("Red Cross", "Volunteer", None));
        undated.add(Experience::new("Red Cross", "Volunteer", None));
        assert_eq!(undated.len(), 1);
    }

    #[test]
    fn test_timeline_iterates_newest_first() {
        let mut education = education_section("education").unwrap();
        education.add(Education::new("A", "CS", date(2019, 9, 1)));
        education.add(Education::new("B", "CS", date(2021, 9, 1)));
        education.add(Education::new("C", "CS", date(2020, 9, 1)));

        let years: Vec<_> = education
            .iter()
            .map(|e| e.start_date.format("%Y").to_string())
            .collect();
        assert_eq!(years, vec!["2021", "2020", "2019"]);
    }

    #[test]
    fn test_undated_experience_sorts_last_in_timeline() {
        let mut work = experience_section("work").unwrap();
        work.add(Experience::new("Undated", "Intern", None));
        work.add(Experience::new("Acme", "Engineer", Some(date(2020, 1, 1))));

        let orgs: Vec<_> = work.iter().map(|e| e.organization.as_str()).collect();
        assert_eq!(orgs, vec!["Acme", "Undated"]);
    }

    fn award(title: &str, date: Option<NaiveDate>) -> Award {
        Award {
            title: title.to_string(),
            date,
            awarder: None,
            summary: None,
        }
    }

    fn publication(name: &str, release_date: Option<NaiveDate>) -> Publication {
        Publication {
            name: name.to_string(),
            publisher: None,
            release_date,
            website: None,
            summary: None,
        }
    }

    #[test]
    fn test_same_award_on_different_dates_is_distinct() {
        let mut awards = award_section("awards").unwrap();
        awards.add(award("Employee of the Month", Some(date(2021, 3, 1))));
        awards.add(award("Employee of the Month", Some(date(2021, 8, 1))));
        assert_eq!(awards.len(), 2);
        assert_eq!(
            award_key(&award("Employee of the Month", Some(date(2021, 3, 1)))),
            "Employee of the Month:20210301"
        );

        let dates: Vec<_> = awards.iter().filter_map(|a| a.date).collect();
        assert_eq!(dates, vec![date(2021, 8, 1), date(2021, 3, 1)]);
    }

    #[test]
    fn test_undated_awards_with_same_title_collapse() {
        let mut awards = award_section("awards").unwrap();
        awards.add(award("Hackathon Winner", None));
        awards.add(Award {
            awarder: Some("DevFest".to_string()),
            ..award("Hackathon Winner", None)
        });

        assert_eq!(awards.len(), 1);
        assert_eq!(
            awards.get("Hackathon Winner").and_then(|a| a.awarder.as_deref()),
            Some("DevFest")
        );
    }

    #[test]
    fn test_publications_iterate_newest_release_first() {
        let mut publications = publication_section("publications").unwrap();
        publications.add(publication("Ownership in Practice", Some(date(2019, 5, 2))));
        publications.add(publication("Async Rust at Scale", Some(date(2023, 1, 15))));
        publications.add(publication("Draft Notes", None));
        publications.add(publication("Lifetimes Explained", Some(date(2021, 10, 9))));

        let names: Vec<_> = publications.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Async Rust at Scale",
                "Lifetimes Explained",
                "Ownership in Practice",
                "Draft Notes",
            ]
        );
    }

    #[test]
    fn test_one_profile_per_network() {
        let mut profiles = profile_set().unwrap();
        profiles.add(Profile::new("twitter", "john", "http://twitter.com/john"));
        profiles.add(Profile::new("twitter", "johnd", "http://twitter.com/johnd"));
        profiles.add(Profile::new("github", "john", "https://github.com/john"));

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles.get("twitter").map(|p| p.username.as_str()), Some("johnd"));

        let networks: Vec<_> = profiles.iter().map(|p| p.network.as_str()).collect();
        assert_eq!(networks, vec!["github", "twitter"]);
    }

    #[test]
    fn test_named_sets_sort_alphabetically() {
        let mut languages = language_section("languages").unwrap();
        languages.add(Language::new("Yoruba", "Native"));
        languages.add(Language::new("English", "Fluent"));
        languages.add(Language::new("Hausa", "Conversational"));

        let names: Vec<_> = languages.iter().map(|l| l.language.as_str()).collect();
        assert_eq!(names, vec!["English", "Hausa", "Yoruba"]);
    }

    #[test]
    fn test_core_sections_are_named() {
        assert_eq!(education_section("education").unwrap().name().as_str(), "education");
        assert_eq!(skill_section("skills").unwrap().name().as_str(), "skills");
        assert!(matches!(
            skill_section(""),
            Err(RezumeError::Configuration(_))
        ));
    }
}
