use serde::{Deserialize, Serialize};

/// Body of `POST /auth/line`: the identity token plus the profile fields
/// the identity provider handed to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub id_token: String,
    pub user_id: String,
    pub name: String,
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub app_token: String,
    pub line_user_id: String,
    pub user_db_id: i64,
}
