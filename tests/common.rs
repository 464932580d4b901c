#![allow(dead_code)]
//! In-process stand-in for the raid service, plus helpers to drive the CLI
//! binary against it.

use assert_cmd::{Command, cargo_bin_cmd};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, TimeZone, Utc};
use rraid::models::{Character, RaidEvent, SignupRecord};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOKEN: &str = "stub-token";
pub const USER_ID: i64 = 7;

/// Raid whose roster endpoint always fails.
pub const BROKEN_RAID: i64 = 999;
/// Raid with a full roster.
pub const FULL_RAID: i64 = 4;

pub struct StubState {
    pub raids: Vec<RaidEvent>,
    pub signups: HashMap<i64, Vec<SignupRecord>>,
    pub characters: Vec<Character>,
    pub next_id: i64,
    pub slow: bool,
    pub requests: Vec<String>,
}

pub type Shared = Arc<Mutex<StubState>>;

pub struct StubServer {
    pub url: String,
    pub state: Shared,
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, mi, 0).unwrap()
}

fn raid(id: i64, title: &str, start: DateTime<Utc>) -> RaidEvent {
    RaidEvent {
        id,
        title: title.to_string(),
        subtitle: None,
        boss: Some(title.to_string()),
        start_time: start,
        created_by: Some(1),
        created_by_name: Some("Organiser".into()),
        created_at: None,
    }
}

fn signup(user_id: i64, character_id: i64, name: &str) -> SignupRecord {
    SignupRecord {
        id: Some(user_id * 100 + character_id),
        character_id,
        character_name: name.to_string(),
        job: Some("Hero".into()),
        level: Some(200),
        user_id,
        user_name: Some(format!("player{user_id}")),
        user_picture: None,
        status: Some("CONFIRMED".into()),
    }
}

impl StubState {
    /// Reset window for "2025-01-04 12:00 UTC" is [Thu 01-02 08:00, Thu 01-09 08:00).
    pub fn seeded() -> Self {
        let raids = vec![
            raid(1, "Zakum", utc(2025, 1, 3, 20, 0)),
            raid(2, "Horntail", utc(2025, 1, 2, 21, 0)),
            raid(3, "Pink Bean", utc(2024, 12, 20, 20, 0)),
            raid(FULL_RAID, "Lucid", utc(2025, 1, 4, 20, 0)),
            raid(BROKEN_RAID, "Will", utc(2025, 1, 5, 20, 0)),
        ];

        let mut signups = HashMap::new();
        signups.insert(1, vec![signup(11, 111, "Bram")]);
        signups.insert(
            FULL_RAID,
            (20..26).map(|u| signup(u, u * 10, "Filler")).collect(),
        );

        Self {
            raids,
            signups,
            characters: Vec::new(),
            next_id: 1000,
            slow: false,
            requests: Vec::new(),
        }
    }

    fn next(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {TOKEN}"))
        .unwrap_or(false)
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Not found", "message": format!("{what} not found")})),
    )
        .into_response()
}

async fn auth_line(State(s): State<Shared>, Json(body): Json<Value>) -> Response {
    s.lock().unwrap().requests.push("POST /auth/line".into());
    if body["idToken"] == "bad" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Unauthorized", "message": "invalid id token"})),
        )
            .into_response();
    }
    Json(json!({
        "appToken": TOKEN,
        "lineUserId": body["userId"],
        "userDbId": USER_ID,
    }))
    .into_response()
}

async fn list_raids(State(s): State<Shared>) -> Response {
    let slow = {
        let mut st = s.lock().unwrap();
        st.requests.push("GET /raids".into());
        st.slow
    };
    if slow {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    let raids = s.lock().unwrap().raids.clone();
    Json(raids).into_response()
}

async fn create_raid(
    State(s): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut st = s.lock().unwrap();
    st.requests.push("POST /raids".into());
    let id = st.next();
    let start: DateTime<Utc> = match body["startTime"].as_str().and_then(|t| t.parse().ok()) {
        Some(t) => t,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Validation failed", "message": "startTime: Start time is required"})),
            )
                .into_response();
        }
    };
    let mut r = raid(id, body["title"].as_str().unwrap_or_default(), start);
    r.subtitle = body["subtitle"].as_str().map(str::to_string);
    r.created_by = Some(USER_ID);
    r.created_by_name = Some("Tester".into());
    st.raids.push(r.clone());

    if let Some(cid) = body["characterId"].as_i64() {
        let name = st
            .characters
            .iter()
            .find(|c| c.id == cid)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        st.signups.entry(id).or_default().push(signup(USER_ID, cid, &name));
    }
    (StatusCode::CREATED, Json(r)).into_response()
}

async fn delete_raid(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut st = s.lock().unwrap();
    st.requests.push(format!("DELETE /raids/{id}"));
    let before = st.raids.len();
    st.raids.retain(|r| r.id != id);
    if st.raids.len() == before {
        return not_found("Raid");
    }
    st.signups.remove(&id);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_signups(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    if id == BROKEN_RAID {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let mut st = s.lock().unwrap();
    st.requests.push(format!("GET /raids/{id}/signups"));
    Json(st.signups.get(&id).cloned().unwrap_or_default()).into_response()
}

async fn signup_raid(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut st = s.lock().unwrap();
    st.requests.push(format!("POST /raids/{id}/signup"));
    if !st.raids.iter().any(|r| r.id == id) {
        return not_found("Raid");
    }
    let cid = body["characterId"].as_i64().unwrap_or_default();
    let name = st
        .characters
        .iter()
        .find(|c| c.id == cid)
        .map(|c| c.name.clone())
        .unwrap_or_default();
    let rec = signup(USER_ID, cid, &name);
    st.signups.entry(id).or_default().push(rec.clone());
    (StatusCode::CREATED, Json(rec)).into_response()
}

async fn cancel_signup(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut st = s.lock().unwrap();
    st.requests.push(format!("DELETE /raids/{id}/signup"));
    if let Some(list) = st.signups.get_mut(&id) {
        list.retain(|r| r.user_id != USER_ID);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_characters(State(s): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(s.lock().unwrap().characters.clone()).into_response()
}

fn character_from(id: i64, body: &Value) -> Character {
    Character {
        id,
        name: body["name"].as_str().unwrap_or_default().to_string(),
        job: body["job"].as_str().map(str::to_string),
        level: body["level"].as_i64().map(|l| l as i32),
        is_default: body["isDefault"].as_bool().unwrap_or(false),
        created_at: Some(utc(2025, 1, 1, 9, 0)),
        updated_at: None,
    }
}

async fn create_character(
    State(s): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut st = s.lock().unwrap();
    st.requests.push("POST /me/characters".into());
    let id = st.next();
    let c = character_from(id, &body);
    if c.is_default {
        st.characters.iter_mut().for_each(|o| o.is_default = false);
    }
    st.characters.push(c.clone());
    (StatusCode::CREATED, Json(c)).into_response()
}

async fn update_character(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut st = s.lock().unwrap();
    st.requests.push(format!("PUT /me/characters/{id}"));
    let Some(pos) = st.characters.iter().position(|c| c.id == id) else {
        return not_found("Character");
    };
    let c = character_from(id, &body);
    st.characters[pos] = c.clone();
    Json(c).into_response()
}

async fn delete_character(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut st = s.lock().unwrap();
    st.requests.push(format!("DELETE /me/characters/{id}"));
    let before = st.characters.len();
    st.characters.retain(|c| c.id != id);
    if st.characters.len() == before {
        return not_found("Character");
    }
    StatusCode::NO_CONTENT.into_response()
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/auth/line", post(auth_line))
        .route("/raids", get(list_raids).post(create_raid))
        .route("/raids/{id}", axum::routing::delete(delete_raid))
        .route("/raids/{id}/signups", get(list_signups))
        .route("/raids/{id}/signup", post(signup_raid).delete(cancel_signup))
        .route("/me/characters", get(list_characters).post(create_character))
        .route(
            "/me/characters/{id}",
            put(update_character).delete(delete_character),
        )
        .with_state(state)
}

/// Start the stub on an ephemeral port in a background runtime.
pub fn spawn_stub() -> StubServer {
    let state: Shared = Arc::new(Mutex::new(StubState::seeded()));
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind stub");
    listener.set_nonblocking(true).expect("nonblocking");
    let addr = listener.local_addr().expect("local addr");
    let app = router(state.clone());

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("stub runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, app).await.expect("stub server");
        });
    });

    StubServer {
        url: format!("http://{addr}"),
        state,
    }
}

/// Fresh, empty HOME for one test so config and session files are isolated.
pub fn temp_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rraid_{}_{}", name, std::process::id()));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path
}

/// The binary, pointed at `url`, with HOME isolated and local time = UTC.
pub fn rr(home: &PathBuf, url: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("rraid");
    cmd.env("HOME", home)
        .env("TZ", "UTC")
        .env_remove("RUST_LOG")
        .args(["--api-url", url]);
    cmd
}

pub fn login(home: &PathBuf, url: &str) {
    rr(home, url)
        .args(["login", "--id-token", "tok", "--user-id", "U7", "--name", "Tester"])
        .assert()
        .success();
}
