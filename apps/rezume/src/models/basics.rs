use serde::{Deserialize, Serialize};

use crate::models::validation::{
    check_email, check_http_url, check_optional_url, field_path, index_path,
    optional_text_or_number, require_text, text_or_number, FieldViolation, Validate,
};

pub const DEFAULT_COUNTRY_CODE: &str = "NG";

fn default_country_code() -> Option<String> {
    Some(DEFAULT_COUNTRY_CODE.to_string())
}

/// Physical contact address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(deserialize_with = "text_or_number")]
    pub address: String,
    #[serde(
        default,
        alias = "postal_code",
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub region: String,
    #[serde(
        default = "default_country_code",
        alias = "country_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub country_code: Option<String>,
}

impl Location {
    pub fn new(address: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            postal_code: None,
            city: None,
            region: region.into(),
            country_code: default_country_code(),
        }
    }
}

impl Validate for Location {
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>) {
        require_text(path, "address", &self.address, report);
        require_text(path, "region", &self.region, report);
    }
}

/// Profile on a social or professional network. At most one per network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub network: String,
    pub username: String,
    pub url: String,
}

impl Profile {
    pub fn new(
        network: impl Into<String>,
        username: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            network: network.into(),
            username: username.into(),
            url: url.into(),
        }
    }
}

impl Validate for Profile {
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>) {
        require_text(path, "network", &self.network, report);
        require_text(path, "username", &self.username, report);
        check_http_url(path, "url", &self.url, report);
    }
}

/// Personal details of the résumé owner; the `basics` block on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub label: String,
    pub email: String,
    pub location: Location,
    #[serde(
        default,
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Validate for PersonalInfo {
    fn validate(&self, path: &str, report: &mut Vec<FieldViolation>) {
        require_text(path, "name", &self.name, report);
        require_text(path, "label", &self.label, report);
        check_email(path, "email", &self.email, report);
        self.location
            .validate(&field_path(path, "location"), report);
        check_optional_url(path, "website", self.website.as_deref(), report);

        let profiles_path = field_path(path, "profiles");
        for (i, profile) in self.profiles.iter().enumerate() {
            profile.validate(&index_path(&profiles_path, i), report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_basics() -> serde_json::Value {
        json!({
            "name": "John Doe",
            "label": "Programmer",
            "email": "john@doe.com",
            "location": {"address": "276 Alu Avenue", "region": "Kano State"}
        })
    }

    #[test]
    fn test_country_code_defaults_to_ng() {
        let info: PersonalInfo = serde_json::from_value(sample_basics()).unwrap();
        assert_eq!(info.location.country_code.as_deref(), Some("NG"));
        assert!(info.profiles.is_empty());
    }

    #[test]
    fn test_location_accepts_both_casings() {
        let camel: Location = serde_json::from_value(json!({
            "address": "a", "region": "r", "postalCode": "KN 700214", "countryCode": "GH"
        }))
        .unwrap();
        let snake: Location = serde_json::from_value(json!({
            "address": "a", "region": "r", "postal_code": "KN 700214", "country_code": "GH"
        }))
        .unwrap();
        assert_eq!(camel, snake);

        let out = serde_json::to_value(&camel).unwrap();
        assert_eq!(out["postalCode"], "KN 700214");
        assert!(out.get("city").is_none());
    }

    #[test]
    fn test_unquoted_numbers_are_read_as_text() {
        let mut data = sample_basics();
        data["phone"] = json!(8030000000u64);
        data["location"]["postalCode"] = json!(700214);
        data["location"]["address"] = json!(276);

        let info: PersonalInfo = serde_json::from_value(data).unwrap();
        assert_eq!(info.phone.as_deref(), Some("8030000000"));
        assert_eq!(info.location.postal_code.as_deref(), Some("700214"));
        assert_eq!(info.location.address, "276");

        let out = serde_json::to_value(&info).unwrap();
        assert_eq!(out["location"]["postalCode"], "700214");
        assert_eq!(out["phone"], "8030000000");
    }

    #[test]
    fn test_missing_location_fails_to_decode() {
        let mut data = sample_basics();
        data.as_object_mut().unwrap().remove("location");
        let err = serde_json::from_value::<PersonalInfo>(data).unwrap_err();
        assert!(err.to_string().contains("location"));
    }

    #[test]
    fn test_semantic_checks_report_paths() {
        let mut info: PersonalInfo = serde_json::from_value(sample_basics()).unwrap();
        info.email = "john".to_string();
        info.website = Some("johndoe".to_string());
        info.profiles.push(Profile::new("twitter", "john", "not a url"));

        let mut report = Vec::new();
        info.validate("basics", &mut report);
        let paths: Vec<_> = report.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["basics.email", "basics.website", "basics.profiles[0].url"]
        );
    }
}
