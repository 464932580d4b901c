use std::path::PathBuf;

use crate::api::ApiClient;
use crate::config::Config;
use crate::core::guard::ActionGuard;
use crate::core::session::SessionState;
use crate::errors::AppResult;

/// Everything an action needs: the API client, the session context and the
/// pending-action guard. Built once per command and passed explicitly.
#[derive(Debug)]
pub struct AppContext {
    pub api: ApiClient,
    pub session: SessionState,
    pub guard: ActionGuard,
    pub session_file: PathBuf,
}

impl AppContext {
    pub fn new(api: ApiClient, session: SessionState, session_file: PathBuf) -> Self {
        Self {
            api,
            session,
            guard: ActionGuard::new(),
            session_file,
        }
    }

    /// Client from the config, session restored from disk.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let api = ApiClient::from_config(cfg)?;
        let session_file = Config::session_file();
        let session = SessionState::load_from(&session_file)?;
        Ok(Self::new(api, session, session_file))
    }
}
