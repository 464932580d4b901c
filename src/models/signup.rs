use serde::{Deserialize, Serialize};

/// One roster entry as returned by `GET /raids/{id}/signups`.
///
/// The character fields are a snapshot taken at signup time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub character_id: i64,
    pub character_name: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub level: Option<i32>,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_picture: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `POST /raids/{id}/signup`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub character_id: i64,
}
