use clap::Subcommand;
use serde_json::json;

use crate::api::ApiClient;
use crate::applications::{ApplicantBoard, StatusUpdateKey};
use crate::cli::utils::{
    guard_session, output_client_error, output_data, output_success, session_manager,
};
use crate::cli::OutputFormat;
use crate::session::gate::RouteRequirement;
use crate::session::routes::requirement_for;
use crate::types::ApplicationStatus;

#[derive(Subcommand)]
pub enum ApplicantCommands {
    #[command(about = "List applicants per posted job")]
    List,

    #[command(about = "Set the status of one application")]
    SetStatus {
        #[arg(help = "Job id")]
        job_id: String,
        #[arg(help = "Applicant (student) id")]
        applicant_id: String,
        #[arg(help = "New status: pending, accepted, rejected, or hired")]
        status: String,
    },
}

fn applicants_requirement() -> RouteRequirement {
    requirement_for("/applicants").unwrap_or(RouteRequirement::AnyAuthenticated)
}

pub async fn handle(cmd: ApplicantCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let manager = session_manager()?;
    let session = guard_session(&manager, &applicants_requirement())?;
    let api = ApiClient::from_config().map_err(|e| anyhow::anyhow!(e.message()))?;

    match cmd {
        ApplicantCommands::List => {
            let listing = match api.list_applicants(&session).await {
                Ok(listing) => listing,
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            };
            if listing.is_empty() {
                return output_success(&output_format, "No applicants yet", None);
            }
            output_data(&output_format, &serde_json::to_value(&listing)?)
        }
        ApplicantCommands::SetStatus {
            job_id,
            applicant_id,
            status,
        } => {
            let status: ApplicationStatus = status
                .parse()
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            let listing = match api.list_applicants(&session).await {
                Ok(listing) => listing,
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            };

            let mut board = ApplicantBoard::new(listing);
            let key = StatusUpdateKey::new(job_id.clone(), applicant_id.clone());
            if board.status_of(&key).is_none() {
                anyhow::bail!(
                    "no application for job '{}' by applicant '{}'",
                    job_id,
                    applicant_id
                );
            }

            if !board.begin_update(key.clone()) {
                // Unreachable in a serial CLI invocation; same no-op
                // behavior as a disabled control.
                return output_success(&output_format, "Update already in progress", None);
            }

            let result = api
                .update_application_status(&session, &job_id, &applicant_id, status)
                .await;

            match result {
                Ok(()) => {
                    board.complete_update(&key, Some(status));
                    output_success(
                        &output_format,
                        &format!("Application marked {}", status),
                        Some(json!({
                            "jobId": job_id,
                            "applicantId": applicant_id,
                            "status": status,
                        })),
                    )
                }
                Err(e) => {
                    board.complete_update(&key, None);
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
    }
}
