use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled raid as returned by `GET /raids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidEvent {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub boss: Option<String>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl RaidEvent {
    /// Creator name, or a placeholder when the API did not resolve it.
    pub fn creator_label(&self) -> &str {
        self.created_by_name.as_deref().unwrap_or("unknown")
    }
}

/// Body of `POST /raids`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRaidRequest {
    pub title: String,
    pub subtitle: Option<String>,
    pub boss: String,
    pub start_time: DateTime<Utc>,
    pub character_id: i64,
}
