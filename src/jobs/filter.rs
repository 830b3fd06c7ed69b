use crate::jobs::model::Job;

/// Which job fields a view variant matches the search term against.
#[derive(Debug, Clone)]
pub struct FilterFields {
    pub title: bool,
    pub company: bool,
    pub location: bool,
    pub experience_level: bool,
}

impl Default for FilterFields {
    // The browse view matches title, company, and location.
    fn default() -> Self {
        Self {
            title: true,
            company: true,
            location: true,
            experience_level: false,
        }
    }
}

/// Case-insensitive substring filter over a job list.
///
/// Pure and order-preserving: the result keeps the input order, and an empty
/// term returns the input unchanged.
pub fn filter_jobs(jobs: &[Job], term: &str, fields: &FilterFields) -> Vec<Job> {
    if term.is_empty() {
        return jobs.to_vec();
    }

    let needle = term.to_lowercase();
    jobs.iter()
        .filter(|job| {
            (fields.title && job.title.to_lowercase().contains(&needle))
                || (fields.company
                    && job
                        .company
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle)))
                || (fields.location && job.location.to_lowercase().contains(&needle))
                || (fields.experience_level
                    && job
                        .experience_level
                        .as_str()
                        .to_lowercase()
                        .contains(&needle))
        })
        .cloned()
        .collect()
}
