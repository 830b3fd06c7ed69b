use clap::Subcommand;
use serde_json::json;
use std::io::{BufRead, Write};

use crate::api::ApiClient;
use crate::cli::utils::{guard, output_client_error, output_success, session_manager};
use crate::cli::OutputFormat;
use crate::profile::{CompanyProfile, StudentProfile};
use crate::session::gate::RouteRequirement;
use crate::types::Role;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the job board")]
    Login {
        #[arg(help = "Account email")]
        email: String,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and clear the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show the account record for the logged-in user")]
    Whoami,

    #[command(about = "Register a student account")]
    RegisterStudent {
        #[arg(help = "Account email")]
        email: String,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Full name")]
        full_name: String,
        #[arg(long, help = "Link to hosted resume")]
        resume_link: String,
        #[arg(long, help = "Portfolio URL")]
        portfolio: String,
        #[arg(long, value_delimiter = ',', help = "Comma-separated skills")]
        skills: Vec<String>,
    },

    #[command(about = "Register a company account")]
    RegisterCompany {
        #[arg(help = "Account email")]
        email: String,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Company name")]
        company_name: String,
        #[arg(long, default_value = "", help = "Industry")]
        industry: String,
        #[arg(long, default_value = "", help = "Location")]
        location: String,
        #[arg(long, default_value = "", help = "Website URL")]
        website: String,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let manager = session_manager()?;
            guard(&manager, &RouteRequirement::PublicOnly)?;

            let password = resolve_password(password)?;
            let api = ApiClient::from_config().map_err(|e| anyhow::anyhow!(e.message()))?;

            let outcome = match api.login(&email, &password).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            };

            // The session commits as one record; a storage failure here
            // leaves the previous (logged-out) state in place.
            if let Err(e) = manager.login(outcome.token, outcome.role, outcome.user_id) {
                output_client_error(&output_format, &e)?;
                std::process::exit(1);
            }

            output_success(
                &output_format,
                &format!("Logged in as {} ({})", email, outcome.role),
                Some(json!({ "role": outcome.role })),
            )
        }
        AuthCommands::Logout => {
            let manager = session_manager()?;
            match manager.logout() {
                Ok(()) => output_success(&output_format, "Logged out", None),
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
        AuthCommands::Status => {
            let manager = session_manager()?;
            match manager.current().map_err(|e| anyhow::anyhow!(e.to_string()))? {
                Some(session) => output_success(
                    &output_format,
                    &format!("Logged in as {} ({})", session.user_id, session.role),
                    Some(json!({
                        "role": session.role,
                        "userId": session.user_id,
                    })),
                ),
                None => output_success(&output_format, "Not logged in", None),
            }
        }
        AuthCommands::Whoami => {
            let manager = session_manager()?;
            let session =
                crate::cli::utils::guard_session(&manager, &RouteRequirement::AnyAuthenticated)?;
            let api = ApiClient::from_config().map_err(|e| anyhow::anyhow!(e.message()))?;

            match api.fetch_user(&session).await {
                Ok(user) => output_success(
                    &output_format,
                    &format!("{} ({})", user.email, session.role),
                    Some(json!({
                        "email": user.email,
                        "role": session.role,
                        "userId": session.user_id,
                    })),
                ),
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
        AuthCommands::RegisterStudent {
            email,
            password,
            full_name,
            resume_link,
            portfolio,
            skills,
        } => {
            let manager = session_manager()?;
            guard(&manager, &RouteRequirement::PublicOnly)?;

            let password = resolve_password(password)?;
            let profile = StudentProfile {
                full_name,
                resume_link,
                portfolio,
                skills,
                ..StudentProfile::default()
            };
            let profile_value = serde_json::to_value(&profile)?;

            let api = ApiClient::from_config().map_err(|e| anyhow::anyhow!(e.message()))?;
            match api
                .register(&email, &password, Role::Student, &profile_value)
                .await
            {
                Ok(()) => output_success(
                    &output_format,
                    "Registration successful - log in with 'jobbox auth login'",
                    None,
                ),
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
        AuthCommands::RegisterCompany {
            email,
            password,
            company_name,
            industry,
            location,
            website,
        } => {
            let manager = session_manager()?;
            guard(&manager, &RouteRequirement::PublicOnly)?;

            let password = resolve_password(password)?;
            let profile = CompanyProfile {
                company_name,
                industry,
                location,
                website,
                ..CompanyProfile::default()
            };
            let profile_value = serde_json::to_value(&profile)?;

            let api = ApiClient::from_config().map_err(|e| anyhow::anyhow!(e.message()))?;
            match api
                .register(&email, &password, Role::Company, &profile_value)
                .await
            {
                Ok(()) => output_success(
                    &output_format,
                    "Registration successful - log in with 'jobbox auth login'",
                    None,
                ),
                Err(e) => {
                    output_client_error(&output_format, &e)?;
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Use the provided password or read one line from stdin.
fn resolve_password(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
