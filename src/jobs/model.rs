use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ClientError, ClientResult};
use crate::types::{EmploymentType, ExperienceLevel};

/// A job posting as the backend exchanges it.
///
/// `id` and `company` are server-assigned and absent from a draft being
/// posted; everything else is author-provided. Older backend revisions named
/// the highlights field `highlights`, so both spellings decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub title: String,
    pub description: String,
    pub experience_level: ExperienceLevel,
    pub employment_type: EmploymentType,
    pub openings: u32,
    pub location: String,
    pub salary: String,
    pub deadline_date: NaiveDate,
    #[serde(alias = "highlights", default)]
    pub job_highlights: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub key_skills: Vec<String>,
}

impl Job {
    /// Client-side required-field checks, run before a draft is posted.
    /// Nothing is sent when this fails.
    pub fn validate_draft(&self) -> ClientResult<()> {
        let mut field_errors = HashMap::new();

        if self.title.trim().is_empty() {
            field_errors.insert("title".to_string(), "Job title is required".to_string());
        }
        if self.location.trim().is_empty() {
            field_errors.insert("location".to_string(), "Location is required".to_string());
        }
        if self.description.trim().is_empty() {
            field_errors.insert(
                "description".to_string(),
                "Description is required".to_string(),
            );
        }
        if self.openings == 0 {
            field_errors.insert(
                "openings".to_string(),
                "At least one opening is required".to_string(),
            );
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ClientError::validation(
                "Job posting is missing required fields",
                field_errors,
            ))
        }
    }
}
