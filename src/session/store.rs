use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::types::Role;

/// The client-held identity record: token, role, and user id.
///
/// All three fields exist together or the session does not exist at all; a
/// missing record means "logged out". The struct has no optional fields so a
/// partially-populated session is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub user_id: String,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            role,
            user_id: user_id.into(),
        }
    }

    /// A session authenticates iff its token is non-empty.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("session storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session record could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("no usable config directory: {0}")]
    NoConfigDir(String),
}

/// Storage for the single composite session record.
///
/// Implementations persist the whole record in one operation, so a failed
/// write leaves the previous record (or its absence) fully intact.
pub trait SessionStore {
    fn load(&self) -> Result<Option<Session>, StorageError>;
    fn save(&self, session: &Session) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Session record persisted as session.json under the config directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the store location from configuration: an explicit
    /// `session.config_dir`, else JOBBOX_CONFIG_DIR, else
    /// $HOME/.config/jobbox.
    pub fn from_config() -> Result<Self, StorageError> {
        if let Some(dir) = &crate::config::config().session.config_dir {
            return Ok(Self::new(dir.clone()));
        }
        if let Ok(custom_dir) = std::env::var("JOBBOX_CONFIG_DIR") {
            return Ok(Self::new(custom_dir));
        }
        let home = std::env::var("HOME")
            .map_err(|_| StorageError::NoConfigDir("HOME environment variable not set".into()))?;
        Ok(Self::new(
            PathBuf::from(home).join(".config").join("jobbox"),
        ))
    }

    fn session_file(&self) -> PathBuf {
        self.dir.join("session.json")
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        let session_file = self.session_file();
        if !session_file.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(session_file)?;
        match serde_json::from_str::<Session>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A record we cannot parse is treated as logged out rather
                // than as a half-populated session.
                tracing::warn!("discarding unreadable session record: {}", e);
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let content = serde_json::to_string_pretty(session)?;

        // Stage the new record next to the old one and commit with a rename,
        // so a failure at any point leaves the previous record untouched.
        let tmp_file = self.dir.join("session.json.tmp");
        fs::write(&tmp_file, content)?;
        fs::rename(&tmp_file, self.session_file())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let session_file = self.session_file();
        if session_file.exists() {
            fs::remove_file(session_file)?;
        }
        Ok(())
    }
}

/// In-process store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        Ok(self.session.lock().unwrap().clone())
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
