use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::profile::merge::merge;

/// Student profile sub-document, camelCase on the wire.
///
/// Defaults are the authoritative edit-form shape: every leaf starts as an
/// empty string or empty sequence, except `education` and `projects`, which
/// start with one blank template entry so the edit form always has a row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentProfile {
    pub full_name: String,
    pub resume_link: String,
    pub portfolio: String,
    pub profile_image: String,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub social_links: StudentSocialLinks,
    pub location: String,
    pub phone_number: String,
    pub dob: String,
    pub gender: String,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: String,
    pub university: String,
    pub year: String,
    pub grade: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub link: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentSocialLinks {
    pub linkedin: String,
    pub github: String,
    pub twitter: String,
}

/// Company profile sub-document, camelCase on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyProfile {
    pub company_name: String,
    pub industry: String,
    pub location: String,
    pub website: String,
    pub logo: String,
    pub description: String,
    pub founded_year: String,
    pub employee_count: String,
    pub main_services: Vec<String>,
    pub headquarters: Headquarters,
    pub company_info: CompanyInfo,
    pub contact: CompanyContact,
    pub social_links: CompanySocialLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Headquarters {
    pub address: String,
    pub pin_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    #[serde(rename = "type")]
    pub company_type: String,
    pub parent_company: String,
    pub stock_symbols: StockSymbols,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockSymbols {
    pub bse: String,
    pub nse: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyContact {
    pub phone: String,
    pub hr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanySocialLinks {
    pub linkedin: String,
    pub twitter: String,
}

impl StudentProfile {
    /// The authoritative default shape the merge engine fills in against.
    pub fn default_shape() -> Value {
        let mut base = Self::default();
        base.education = vec![EducationEntry::default()];
        base.projects = vec![ProjectEntry::default()];
        serde_json::to_value(base).expect("student default shape serializes")
    }

    /// Merge a possibly-partial server profile over the default shape and
    /// deserialize the fully-keyed result.
    pub fn merged(server: Option<&Value>) -> ClientResult<Self> {
        let merged = merge(&Self::default_shape(), server);
        serde_json::from_value(merged)
            .map_err(|e| ClientError::invalid_response(format!("student profile: {}", e)))
    }
}

impl CompanyProfile {
    pub fn default_shape() -> Value {
        serde_json::to_value(Self::default()).expect("company default shape serializes")
    }

    pub fn merged(server: Option<&Value>) -> ClientResult<Self> {
        let merged = merge(&Self::default_shape(), server);
        serde_json::from_value(merged)
            .map_err(|e| ClientError::invalid_response(format!("company profile: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn student_shape_uses_wire_field_names() {
        let shape = StudentProfile::default_shape();
        assert!(shape.get("fullName").is_some());
        assert!(shape.get("resumeLink").is_some());
        assert!(shape.get("full_name").is_none());
    }

    #[test]
    fn company_info_type_field_round_trips() {
        let shape = CompanyProfile::default_shape();
        assert_eq!(shape["companyInfo"]["type"], json!(""));
        assert_eq!(shape["companyInfo"]["stockSymbols"]["bse"], json!(""));
    }

    #[test]
    fn student_defaults_include_one_template_row() {
        let shape = StudentProfile::default_shape();
        assert_eq!(shape["education"].as_array().unwrap().len(), 1);
        assert_eq!(shape["education"][0]["degree"], json!(""));
        assert_eq!(shape["projects"].as_array().unwrap().len(), 1);
    }
}
