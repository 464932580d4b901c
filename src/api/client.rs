//! HTTP client for the raid service.
//!
//! Every request carries a deadline: the identity exchange uses the login
//! timeout, everything else the general API timeout. Nothing is retried.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Character, CharacterForm, CreateRaidRequest, LoginRequest, LoginResponse, RaidEvent,
    SignupRecord, SignupRequest,
};

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    login_timeout: Duration,
    api_timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, login_timeout: Duration, api_timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("rraid/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            login_timeout,
            api_timeout,
        })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::new(&cfg.api_url, cfg.login_timeout(), cfg.api_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, authorized = session.is_some(), "request");
        let rb = self.http.request(method, url).timeout(self.api_timeout);
        match session {
            Some(s) => rb.bearer_auth(&s.token),
            None => rb,
        }
    }

    /// Send and decode. `Ok(None)` for 204 or an empty body.
    async fn execute<T: DeserializeOwned>(
        &self,
        rb: RequestBuilder,
        what: &str,
    ) -> AppResult<Option<T>> {
        let resp = rb.send().await.map_err(|e| transport_error(e, what))?;
        let status = resp.status();

        if !status.is_success() {
            return Err(error_from_response(resp).await);
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = resp.bytes().await.map_err(|e| transport_error(e, what))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn fetch<T: DeserializeOwned>(&self, rb: RequestBuilder, what: &str) -> AppResult<T> {
        self.execute(rb, what).await?.ok_or_else(|| AppError::Api {
            status: 200,
            message: format!("empty response while {what}"),
        })
    }

    // ---------------------------
    // Auth
    // ---------------------------

    /// Exchange the identity token for a session token.
    pub async fn login(&self, req: &LoginRequest) -> AppResult<LoginResponse> {
        let rb = self
            .request(Method::POST, "/auth/line", None)
            .timeout(self.login_timeout)
            .json(req);

        match self.fetch(rb, "logging in").await {
            Err(AppError::Api { status, message }) => {
                warn!(status, "identity exchange rejected");
                Err(AppError::AuthFailed(format!("({status}) {message}")))
            }
            other => other,
        }
    }

    // ---------------------------
    // Raids
    // ---------------------------

    pub async fn list_raids(&self) -> AppResult<Vec<RaidEvent>> {
        let rb = self.request(Method::GET, "/raids", None);
        Ok(self.execute(rb, "loading raids").await?.unwrap_or_default())
    }

    pub async fn list_signups(&self, raid_id: i64) -> AppResult<Vec<SignupRecord>> {
        let rb = self.request(Method::GET, &format!("/raids/{raid_id}/signups"), None);
        Ok(self
            .execute(rb, "loading the roster")
            .await?
            .unwrap_or_default())
    }

    pub async fn create_raid(
        &self,
        session: &Session,
        req: &CreateRaidRequest,
    ) -> AppResult<Option<RaidEvent>> {
        let rb = self.request(Method::POST, "/raids", Some(session)).json(req);
        self.execute(rb, "creating the raid").await
    }

    pub async fn delete_raid(&self, session: &Session, raid_id: i64) -> AppResult<()> {
        let rb = self.request(Method::DELETE, &format!("/raids/{raid_id}"), Some(session));
        self.execute::<serde_json::Value>(rb, "deleting the raid")
            .await
            .map(|_| ())
    }

    pub async fn signup(
        &self,
        session: &Session,
        raid_id: i64,
        character_id: i64,
    ) -> AppResult<Option<SignupRecord>> {
        let rb = self
            .request(Method::POST, &format!("/raids/{raid_id}/signup"), Some(session))
            .json(&SignupRequest { character_id });
        self.execute(rb, "signing up").await
    }

    pub async fn cancel_signup(&self, session: &Session, raid_id: i64) -> AppResult<()> {
        let rb = self.request(
            Method::DELETE,
            &format!("/raids/{raid_id}/signup"),
            Some(session),
        );
        self.execute::<serde_json::Value>(rb, "cancelling the signup")
            .await
            .map(|_| ())
    }

    // ---------------------------
    // Characters
    // ---------------------------

    pub async fn list_characters(&self, session: &Session) -> AppResult<Vec<Character>> {
        let rb = self.request(Method::GET, "/me/characters", Some(session));
        Ok(self
            .execute(rb, "loading characters")
            .await?
            .unwrap_or_default())
    }

    pub async fn create_character(
        &self,
        session: &Session,
        form: &CharacterForm,
    ) -> AppResult<Option<Character>> {
        let rb = self
            .request(Method::POST, "/me/characters", Some(session))
            .json(form);
        self.execute(rb, "creating the character").await
    }

    pub async fn update_character(
        &self,
        session: &Session,
        id: i64,
        form: &CharacterForm,
    ) -> AppResult<Option<Character>> {
        let rb = self
            .request(Method::PUT, &format!("/me/characters/{id}"), Some(session))
            .json(form);
        self.execute(rb, "updating the character").await
    }

    pub async fn delete_character(&self, session: &Session, id: i64) -> AppResult<()> {
        let rb = self.request(Method::DELETE, &format!("/me/characters/{id}"), Some(session));
        self.execute::<serde_json::Value>(rb, "deleting the character")
            .await
            .map(|_| ())
    }
}

fn transport_error(e: reqwest::Error, what: &str) -> AppError {
    if e.is_timeout() {
        warn!(what, "request timed out");
        AppError::Timeout(what.to_string())
    } else {
        AppError::Http(e)
    }
}

/// Prefer the server's `message`, then its `error`, then the reason phrase.
async fn error_from_response(resp: Response) -> AppError {
    let status = resp.status();
    let body: ErrorBody = resp
        .bytes()
        .await
        .ok()
        .and_then(|b| serde_json::from_slice(&b).ok())
        .unwrap_or_default();

    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .or(body.error.filter(|m| !m.trim().is_empty()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    debug!(status = status.as_u16(), %message, "api error");
    AppError::Api {
        status: status.as_u16(),
        message,
    }
}
