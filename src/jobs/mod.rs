pub mod filter;
pub mod model;

pub use filter::{filter_jobs, FilterFields};
pub use model::Job;
