use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::applications::JobApplicants;
use crate::error::{ClientError, ClientResult};
use crate::jobs::Job;
use crate::session::Session;
use crate::types::{ApplicationStatus, Role};

/// Wire payload for POST /users/login.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    role: String,
    user_id: String,
}

/// Result of a successful login, with the role already resolved to the
/// typed variant. Everything downstream matches on the enum instead of
/// comparing strings.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub role: Role,
    pub user_id: String,
}

/// GET /users/{id} response: account email plus the raw profile
/// sub-document, which may be partial or absent for a fresh account.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

/// HTTP client for the job-board backend.
///
/// Carries the session token verbatim in the Authorization header; the token
/// is never inspected or refreshed client-side, so an expired token shows up
/// as an ordinary request failure.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::invalid_response(format!("bad base url: {}", e)))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Client against the configured backend.
    pub fn from_config() -> ClientResult<Self> {
        let api = &crate::config::config().api;
        Self::new(&api.base_url, api.http_timeout_secs)
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::invalid_response(format!("bad request path: {}", e)))
    }

    // ---- auth ----

    /// POST /users/login. Required-field checks run before any request is
    /// issued; an unrecognized role in the response fails the login.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginOutcome> {
        let mut field_errors = HashMap::new();
        if email.trim().is_empty() {
            field_errors.insert("email".to_string(), "Email is required".to_string());
        }
        if password.is_empty() {
            field_errors.insert("password".to_string(), "Password is required".to_string());
        }
        if !field_errors.is_empty() {
            return Err(ClientError::validation("Login fields missing", field_errors));
        }

        let res = self
            .http
            .post(self.url("/users/login")?)
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let body: LoginResponse = Self::decode(res).await?;

        let role: Role = body
            .role
            .parse()
            .map_err(|e| ClientError::invalid_response(format!("login response: {}", e)))?;

        Ok(LoginOutcome {
            token: body.token,
            role,
            user_id: body.user_id,
        })
    }

    /// POST /users/register. Registration does not log the user in; the
    /// backend answers with an empty body and the caller logs in separately.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: Role,
        profile: &Value,
    ) -> ClientResult<()> {
        let mut field_errors = HashMap::new();
        if email.trim().is_empty() {
            field_errors.insert("email".to_string(), "Email is required".to_string());
        }
        if password.is_empty() {
            field_errors.insert("password".to_string(), "Password is required".to_string());
        }
        if !field_errors.is_empty() {
            return Err(ClientError::validation(
                "Registration fields missing",
                field_errors,
            ));
        }

        let res = self
            .http
            .post(self.url("/users/register")?)
            .json(&json!({
                "email": email,
                "password": password,
                "role": role,
                "profile": profile,
            }))
            .send()
            .await?;
        Self::expect_success(res).await
    }

    // ---- users ----

    pub async fn fetch_user(&self, session: &Session) -> ClientResult<UserRecord> {
        let res = self
            .http
            .get(self.url(&format!("/users/{}", session.user_id))?)
            .header("Authorization", &session.token)
            .send()
            .await?;
        Self::decode(res).await
    }

    /// PATCH /users/{id} with the full current profile structure - the save
    /// path is identity, no diffing.
    pub async fn update_profile(&self, session: &Session, profile: &Value) -> ClientResult<()> {
        let res = self
            .http
            .patch(self.url(&format!("/users/{}", session.user_id))?)
            .header("Authorization", &session.token)
            .json(&json!({ "profile": profile }))
            .send()
            .await?;
        Self::expect_success(res).await
    }

    // ---- jobs ----

    pub async fn list_jobs(&self, session: &Session) -> ClientResult<Vec<Job>> {
        let res = self
            .http
            .get(self.url("/jobs")?)
            .header("Authorization", &session.token)
            .send()
            .await?;
        Self::decode(res).await
    }

    pub async fn fetch_job(&self, session: &Session, job_id: &str) -> ClientResult<Job> {
        let res = self
            .http
            .get(self.url(&format!("/jobs/{}", job_id))?)
            .header("Authorization", &session.token)
            .send()
            .await?;
        Self::decode(res).await
    }

    pub async fn post_job(&self, session: &Session, job: &Job) -> ClientResult<()> {
        job.validate_draft()?;
        let res = self
            .http
            .post(self.url("/jobs")?)
            .header("Authorization", &session.token)
            .json(job)
            .send()
            .await?;
        Self::expect_success(res).await
    }

    /// PATCH /jobs/{id} with a partial set of job fields.
    pub async fn update_job(
        &self,
        session: &Session,
        job_id: &str,
        changes: &Value,
    ) -> ClientResult<()> {
        let res = self
            .http
            .patch(self.url(&format!("/jobs/{}", job_id))?)
            .header("Authorization", &session.token)
            .json(changes)
            .send()
            .await?;
        Self::expect_success(res).await
    }

    pub async fn delete_job(&self, session: &Session, job_id: &str) -> ClientResult<()> {
        let res = self
            .http
            .delete(self.url(&format!("/jobs/{}", job_id))?)
            .header("Authorization", &session.token)
            .send()
            .await?;
        Self::expect_success(res).await
    }

    /// POST /jobs/{id}/apply. Returns the server's confirmation message.
    pub async fn apply_to_job(&self, session: &Session, job_id: &str) -> ClientResult<String> {
        let res = self
            .http
            .post(self.url(&format!("/jobs/{}/apply", job_id))?)
            .header("Authorization", &session.token)
            .json(&json!({}))
            .send()
            .await?;
        let body: MessageResponse = Self::decode(res).await?;
        Ok(body.message)
    }

    // ---- applications ----

    pub async fn list_applicants(&self, session: &Session) -> ClientResult<Vec<JobApplicants>> {
        let res = self
            .http
            .get(self.url(&format!("/jobs/applicants/{}", session.user_id))?)
            .header("Authorization", &session.token)
            .send()
            .await?;
        Self::decode(res).await
    }

    pub async fn update_application_status(
        &self,
        session: &Session,
        job_id: &str,
        applicant_id: &str,
        status: ApplicationStatus,
    ) -> ClientResult<()> {
        let res = self
            .http
            .put(self.url(&format!("/jobs/{}/status/{}", job_id, applicant_id))?)
            .header("Authorization", &session.token)
            .json(&json!({ "status": status }))
            .send()
            .await?;
        Self::expect_success(res).await
    }

    // ---- response handling ----

    async fn decode<T: serde::de::DeserializeOwned>(res: Response) -> ClientResult<T> {
        let res = Self::check_status(res).await?;
        res.json::<T>().await.map_err(ClientError::from)
    }

    async fn expect_success(res: Response) -> ClientResult<()> {
        Self::check_status(res).await.map(|_| ())
    }

    /// Pass 2xx responses through; turn everything else into a
    /// RemoteRequestFailed carrying the server message when the body has one.
    async fn check_status(res: Response) -> ClientResult<Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let message = res
            .json::<Value>()
            .await
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| generic_status_message(status));

        tracing::debug!(status = status.as_u16(), %message, "request failed");
        Err(ClientError::remote(Some(status.as_u16()), message))
    }
}

fn generic_status_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("Request failed: {} {}", status.as_u16(), reason),
        None => format!("Request failed with status {}", status.as_u16()),
    }
}
