pub mod applicants;
pub mod auth;
pub mod jobs;
pub mod profile;
