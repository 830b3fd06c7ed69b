use clap::Subcommand;
use serde_json::Value;
use std::path::PathBuf;

use crate::api::ApiClient;
use crate::cli::utils::{
    guard_session, output_client_error, output_data, output_success, session_manager,
};
use crate::cli::OutputFormat;
use crate::profile::{CompanyProfile, StudentProfile};
use crate::session::gate::RouteRequirement;
use crate::types::Role;

#[derive(Subcommand)]
pub enum ProfileCommands {
    #[command(about = "Show the current profile, fully populated with defaults")]
    Show,

    #[command(about = "Replace the profile with the contents of a JSON file")]
    Update {
        #[arg(long, help = "Path to the edited profile JSON")]
        file: PathBuf,
    },
}

pub async fn handle(cmd: ProfileCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let manager = session_manager()?;
    let session = guard_session(&manager, &RouteRequirement::AnyAuthenticated)?;
    let api = ApiClient::from_config().map_err(|e| anyhow::anyhow!(e.message()))?;

    match cmd {
        ProfileCommands::Show => {
            let user = match api.fetch_user(&session).await {
                Ok(user) => user,
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            };

            // Whatever subset the server stored, the merged document is
            // fully keyed and ready to edit and send back.
            let merged = match merged_for_role(session.role, user.profile.as_ref()) {
                Ok(value) => value,
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            };
            output_data(&output_format, &merged)
        }
        ProfileCommands::Update { file } => {
            let content = std::fs::read_to_string(&file)
                .map_err(|e| anyhow::anyhow!("could not read {}: {}", file.display(), e))?;
            let edited: Value = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("could not parse {}: {}", file.display(), e))?;

            // Normalize the edited document against the role's shape, then
            // send the full structure - the save path does no diffing.
            let payload = match merged_for_role(session.role, Some(&edited)) {
                Ok(value) => value,
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            };

            match api.update_profile(&session, &payload).await {
                Ok(()) => output_success(&output_format, "Profile updated", None),
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Merge a possibly-partial profile document over the default shape of the
/// session's role variant.
fn merged_for_role(
    role: Role,
    profile: Option<&Value>,
) -> Result<Value, crate::error::ClientError> {
    let value = match role {
        Role::Student => serde_json::to_value(StudentProfile::merged(profile)?),
        Role::Company => serde_json::to_value(CompanyProfile::merged(profile)?),
    };
    value.map_err(|e| crate::error::ClientError::invalid_response(e.to_string()))
}
