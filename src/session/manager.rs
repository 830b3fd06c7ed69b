use std::collections::HashMap;

use crate::error::{ClientError, ClientResult};
use crate::session::store::{FileSessionStore, Session, SessionStore, StorageError};
use crate::types::Role;

/// Owns every write to the session store.
///
/// Login and logout are the only call sites that mutate the stored record;
/// everything else reads through this type. Because the store persists the
/// record as one composite write, a storage failure during login leaves the
/// prior state observable and nothing else.
pub struct SessionManager<S: SessionStore> {
    store: S,
}

impl SessionManager<FileSessionStore> {
    /// Manager over the on-disk store at the configured location.
    pub fn from_config() -> ClientResult<Self> {
        Ok(Self::new(FileSessionStore::from_config()?))
    }
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Populate the session with all three fields at once.
    pub fn login(
        &self,
        token: impl Into<String>,
        role: Role,
        user_id: impl Into<String>,
    ) -> ClientResult<Session> {
        let token = token.into();
        let user_id = user_id.into();

        let mut field_errors = HashMap::new();
        if token.is_empty() {
            field_errors.insert("token".to_string(), "Token must not be empty".to_string());
        }
        if user_id.is_empty() {
            field_errors.insert("userId".to_string(), "User id must not be empty".to_string());
        }
        if !field_errors.is_empty() {
            return Err(ClientError::validation(
                "Incomplete login response",
                field_errors,
            ));
        }

        let session = Session::new(token, role, user_id);
        self.store.save(&session)?;
        tracing::debug!(role = %role, "session established");
        Ok(session)
    }

    /// Clear the session record; `is_authenticated` is false afterward.
    pub fn logout(&self) -> ClientResult<()> {
        self.store.clear()?;
        tracing::debug!("session cleared");
        Ok(())
    }

    /// Current session, if one is stored.
    pub fn current(&self) -> Result<Option<Session>, StorageError> {
        self.store.load()
    }

    /// True iff a stored session carries a non-empty token. A store that
    /// cannot be read counts as logged out.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.store.load(), Ok(Some(ref s)) if s.is_authenticated())
    }

    pub fn current_role(&self) -> Option<Role> {
        self.store.load().ok().flatten().map(|s| s.role)
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.store.load().ok().flatten().map(|s| s.user_id)
    }

    pub fn token(&self) -> Option<String> {
        self.store.load().ok().flatten().map(|s| s.token)
    }
}
