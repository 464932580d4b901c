//! Unified application error type.
//! All modules (api, core, cli, utils) return AppError so that every failure
//! reaches the command boundary in the same shape and is printed once.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Network
    // ---------------------------
    #[error("Request timed out while {0}. Check that the raid service is reachable.")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // ---------------------------
    // Authentication
    // ---------------------------
    #[error("Login failed: {0}")]
    AuthFailed(String),

    #[error("Not logged in. Run `rraid login` first.")]
    NotAuthenticated,

    // ---------------------------
    // Client-side rules
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("Invalid date/time: {0}")]
    InvalidDate(String),

    #[error("{0} no longer exists; the list has been refreshed")]
    StaleView(String),

    #[error("Raid {0} is full")]
    RosterFull(i64),

    #[error("You are already signed up for raid {0}")]
    AlreadySignedUp(i64),

    #[error("Another '{0}' action is still pending")]
    ActionPending(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for failures raised before any request left the client.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidDate(_)
                | AppError::NotAuthenticated
                | AppError::RosterFull(_)
                | AppError::AlreadySignedUp(_)
                | AppError::ActionPending(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
