use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::profile::shapes::EducationEntry;
use crate::types::ApplicationStatus;

fn pending() -> ApplicationStatus {
    ApplicationStatus::Pending
}

/// One student's application as it appears in the company's applicant
/// listing. The backend omits `status` until a company first touches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    #[serde(rename = "studentid")]
    pub student_id: String,
    /// Display name of the applicant.
    #[serde(default)]
    pub student: String,
    #[serde(default = "pending")]
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// One posted job with its applicants, as returned by the applicants listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplicants {
    #[serde(rename = "jobid")]
    pub job_id: String,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    #[serde(default)]
    pub applicants: Vec<Applicant>,
}

/// Composite key for one outstanding status update. A struct rather than a
/// concatenated string, so id formats can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusUpdateKey {
    pub job_id: String,
    pub applicant_id: String,
}

impl StatusUpdateKey {
    pub fn new(job_id: impl Into<String>, applicant_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            applicant_id: applicant_id.into(),
        }
    }
}

/// In-memory applicant listing plus the set of in-flight status updates.
///
/// At most one update may be outstanding per (job, applicant) pair; updates
/// to different pairs are unrestricted. The flag exists to disable the
/// control while a request is pending, and is cleared whether the request
/// succeeds or fails.
#[derive(Debug, Default)]
pub struct ApplicantBoard {
    jobs: Vec<JobApplicants>,
    in_flight: HashSet<StatusUpdateKey>,
}

impl ApplicantBoard {
    pub fn new(jobs: Vec<JobApplicants>) -> Self {
        Self {
            jobs,
            in_flight: HashSet::new(),
        }
    }

    pub fn jobs(&self) -> &[JobApplicants] {
        &self.jobs
    }

    pub fn is_update_in_flight(&self, key: &StatusUpdateKey) -> bool {
        self.in_flight.contains(key)
    }

    /// Mark an update as outstanding. Returns false (and changes nothing) if
    /// one is already outstanding for this pair - the caller treats that as
    /// a no-op, the same way a disabled control swallows a second click.
    pub fn begin_update(&mut self, key: StatusUpdateKey) -> bool {
        self.in_flight.insert(key)
    }

    /// Finish an outstanding update. On success (`Some`) the matching
    /// applicant's status is replaced and no other record mutates; on
    /// failure (`None`) nothing mutates. The in-flight flag is cleared in
    /// both cases so the control is always re-enabled.
    pub fn complete_update(&mut self, key: &StatusUpdateKey, applied: Option<ApplicationStatus>) {
        self.in_flight.remove(key);

        let Some(new_status) = applied else {
            return;
        };

        for job in &mut self.jobs {
            if job.job_id != key.job_id {
                continue;
            }
            for applicant in &mut job.applicants {
                if applicant.student_id == key.applicant_id {
                    applicant.status = new_status;
                }
            }
        }
    }

    /// Stored status for one pair, if the pair exists.
    pub fn status_of(&self, key: &StatusUpdateKey) -> Option<ApplicationStatus> {
        self.jobs
            .iter()
            .find(|j| j.job_id == key.job_id)?
            .applicants
            .iter()
            .find(|a| a.student_id == key.applicant_id)
            .map(|a| a.status)
    }
}
