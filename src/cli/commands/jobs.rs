use clap::Subcommand;
use serde_json::{json, Value};
use std::path::PathBuf;

use crate::api::ApiClient;
use crate::cli::utils::{
    guard_session, output_client_error, output_data, output_success, session_manager,
};
use crate::cli::OutputFormat;
use crate::jobs::{filter_jobs, FilterFields, Job};
use crate::session::gate::RouteRequirement;
use crate::session::routes::requirement_for;

#[derive(Subcommand)]
pub enum JobCommands {
    #[command(about = "List open jobs, optionally filtered by a search term")]
    List {
        #[arg(long, help = "Case-insensitive search over title, company, and location")]
        search: Option<String>,
    },

    #[command(about = "Show one job")]
    Get {
        #[arg(help = "Job id")]
        id: String,
    },

    #[command(about = "Post a new job from a JSON file")]
    Post {
        #[arg(long, help = "Path to a JSON job draft")]
        file: PathBuf,
    },

    #[command(about = "Update a posted job with partial fields from a JSON file")]
    Update {
        #[arg(help = "Job id")]
        id: String,
        #[arg(long, help = "Path to a JSON object with the fields to change")]
        file: PathBuf,
    },

    #[command(about = "Delete a posted job")]
    Delete {
        #[arg(help = "Job id")]
        id: String,
    },

    #[command(about = "Apply to a job")]
    Apply {
        #[arg(help = "Job id")]
        id: String,
    },
}

fn company_requirement() -> RouteRequirement {
    requirement_for("/post-job").unwrap_or(RouteRequirement::AnyAuthenticated)
}

fn student_requirement() -> RouteRequirement {
    requirement_for("/view-jobs").unwrap_or(RouteRequirement::AnyAuthenticated)
}

pub async fn handle(cmd: JobCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let manager = session_manager()?;
    let api = ApiClient::from_config().map_err(|e| anyhow::anyhow!(e.message()))?;

    match cmd {
        JobCommands::List { search } => {
            let session = guard_session(&manager, &RouteRequirement::AnyAuthenticated)?;
            let jobs = match api.list_jobs(&session).await {
                Ok(jobs) => jobs,
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            };

            let term = search.unwrap_or_default();
            let visible = filter_jobs(&jobs, &term, &FilterFields::default());
            if visible.is_empty() {
                return output_success(&output_format, "No jobs matched", None);
            }
            output_data(&output_format, &serde_json::to_value(&visible)?)
        }
        JobCommands::Get { id } => {
            let session = guard_session(&manager, &RouteRequirement::AnyAuthenticated)?;
            match api.fetch_job(&session, &id).await {
                Ok(job) => output_data(&output_format, &serde_json::to_value(&job)?),
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
        JobCommands::Post { file } => {
            let session = guard_session(&manager, &company_requirement())?;
            let draft: Job = read_json(&file)?;

            match api.post_job(&session, &draft).await {
                Ok(()) => output_success(
                    &output_format,
                    &format!("Job '{}' posted", draft.title),
                    None,
                ),
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
        JobCommands::Update { id, file } => {
            let session = guard_session(&manager, &company_requirement())?;
            let changes: Value = read_json(&file)?;

            match api.update_job(&session, &id, &changes).await {
                Ok(()) => output_success(&output_format, "Job updated", Some(json!({"id": id}))),
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
        JobCommands::Delete { id } => {
            let session = guard_session(&manager, &company_requirement())?;
            match api.delete_job(&session, &id).await {
                Ok(()) => output_success(&output_format, "Job deleted", Some(json!({"id": id}))),
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
        JobCommands::Apply { id } => {
            let session = guard_session(&manager, &student_requirement())?;
            match api.apply_to_job(&session, &id).await {
                Ok(message) => output_success(&output_format, &message, None),
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("could not read {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("could not parse {}: {}", path.display(), e))
}
