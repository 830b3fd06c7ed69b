use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::error::ClientError;
use crate::session::gate::{decide, GateDecision, RouteRequirement};
use crate::session::store::FileSessionStore;
use crate::session::{Session, SessionManager};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                response
                    .as_object_mut()
                    .expect("success envelope is an object")
                    .extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Render a client failure with its code and any per-field messages.
pub fn output_client_error(
    output_format: &OutputFormat,
    err: &ClientError,
) -> anyhow::Result<()> {
    if let Some(fields) = err.field_errors() {
        if matches!(output_format, OutputFormat::Text) {
            for (field, msg) in fields {
                eprintln!("  {}: {}", field, msg);
            }
        }
    }
    output_error(output_format, &err.message(), Some(err.error_code()))
}

/// Print a JSON document. Both formats render documents the same way;
/// the flag only changes success/error envelopes.
pub fn output_data(_output_format: &OutputFormat, data: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// The session manager every command reads through.
pub fn session_manager() -> anyhow::Result<SessionManager<FileSessionStore>> {
    SessionManager::from_config().map_err(|e| anyhow::anyhow!(e.message()))
}

/// Evaluate the auth gate for a command the way the matching page would.
///
/// Returns the session for requirements that need one. The redirect outcomes
/// become user-facing refusals here, since a CLI has nowhere to navigate.
pub fn guard(
    manager: &SessionManager<FileSessionStore>,
    requirement: &RouteRequirement,
) -> anyhow::Result<Option<Session>> {
    let session = manager
        .current()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    match decide(requirement, session.as_ref()) {
        GateDecision::Allow => Ok(session),
        GateDecision::RedirectLogin => Err(anyhow::anyhow!(
            "Not logged in - run 'jobbox auth login' first"
        )),
        GateDecision::RedirectDefault => match requirement {
            RouteRequirement::PublicOnly => Err(anyhow::anyhow!(
                "Already logged in - run 'jobbox auth logout' first"
            )),
            _ => Err(anyhow::anyhow!(
                "The current account's role cannot perform this action"
            )),
        },
    }
}

/// Like `guard`, but for requirements that imply an authenticated session.
pub fn guard_session(
    manager: &SessionManager<FileSessionStore>,
    requirement: &RouteRequirement,
) -> anyhow::Result<Session> {
    guard(manager, requirement)?
        .ok_or_else(|| anyhow::anyhow!("Not logged in - run 'jobbox auth login' first"))
}
