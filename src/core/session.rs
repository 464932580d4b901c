//! Session context and its lifecycle.
//!
//! The session is written once by `login` and only read afterwards. Every
//! authorized call goes through [`SessionState::require`] before dispatch.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{AppError, AppResult};
use crate::models::LoginResponse;

/// Token and profile of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub line_user_id: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn from_login(resp: LoginResponse, name: String, picture: Option<String>) -> Self {
        Self {
            token: resp.app_token,
            user_id: resp.user_db_id,
            line_user_id: resp.line_user_id,
            name,
            picture,
            logged_in_at: Utc::now(),
        }
    }

    /// Persist the session so later invocations can reuse it.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self)?;

        let mut opts = OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            opts.mode(0o600);
            // `mode` only applies on creation; tighten an older file too.
            if path.exists() {
                fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
            }
        }

        let mut file = opts.open(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated(Session),
    Failed(String),
}

impl SessionState {
    /// Restore a persisted session. A missing or unparsable file means not
    /// logged in; the next `login` overwrites it.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(SessionState::Unauthenticated);
        }
        let content = fs::read_to_string(path)?;
        match serde_yaml::from_str::<Session>(&content) {
            Ok(session) => Ok(SessionState::Authenticated(session)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupted session file");
                Ok(SessionState::Unauthenticated)
            }
        }
    }

    /// Gate for authorized operations.
    pub fn require(&self) -> AppResult<&Session> {
        match self {
            SessionState::Authenticated(s) => Ok(s),
            _ => Err(AppError::NotAuthenticated),
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        match self {
            SessionState::Authenticated(s) => Some(s.user_id),
            _ => None,
        }
    }

    /// Enter the pending state. A second login while one is in flight is refused.
    pub fn begin(&mut self) -> AppResult<()> {
        if matches!(self, SessionState::Authenticating) {
            return Err(AppError::ActionPending("login".into()));
        }
        *self = SessionState::Authenticating;
        Ok(())
    }

    pub fn complete(&mut self, session: Session) {
        *self = SessionState::Authenticated(session);
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        *self = SessionState::Failed(reason.into());
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "not logged in",
            SessionState::Authenticating => "logging in",
            SessionState::Authenticated(_) => "logged in",
            SessionState::Failed(_) => "login failed",
        }
    }
}
