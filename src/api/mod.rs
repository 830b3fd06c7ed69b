pub mod client;

pub use client::{ApiClient, LoginOutcome, UserRecord};
