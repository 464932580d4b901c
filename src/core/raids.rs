use chrono::{DateTime, TimeZone};
use futures_util::future::join_all;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::core::board::RaidBoard;
use crate::core::context::AppContext;
use crate::core::guard::ActionKind;
use crate::core::roster::{is_full, own_signup};
use crate::core::validate::RaidDraft;
use crate::errors::{AppError, AppResult};
use crate::models::{Character, RaidEvent, SignupRecord, character};

/// Result of a successful signup.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub character: Character,
    pub roster: Vec<SignupRecord>,
}

pub struct RaidLogic;

impl RaidLogic {
    /// Load raids and build the board, then patch in the signup counts.
    pub async fn board<Tz: TimeZone>(
        ctx: &AppContext,
        now: &DateTime<Tz>,
        all: bool,
    ) -> AppResult<RaidBoard> {
        let raids = ctx.api.list_raids().await?;
        let mut board = if all {
            RaidBoard::for_all(&raids)
        } else {
            RaidBoard::for_window(&raids, now)
        };
        refresh_counts(&ctx.api, &mut board).await;
        Ok(board)
    }

    pub async fn roster(ctx: &AppContext, raid_id: i64) -> AppResult<Vec<SignupRecord>> {
        ctx.api.list_signups(raid_id).await
    }

    /// Sign up with `character_id`, or with the pre-selected character.
    ///
    /// Refused client-side when the user already has a signup or the roster
    /// is full. The roster is re-fetched after the signup.
    pub async fn join(
        ctx: &AppContext,
        raid_id: i64,
        character_id: Option<i64>,
    ) -> AppResult<JoinOutcome> {
        let session = ctx.session.require()?;
        let _pending = ctx.guard.try_begin(ActionKind::Signup, Some(raid_id))?;

        let characters = ctx.api.list_characters(session).await?;
        let character = choose_character(&characters, character_id)?.clone();

        let roster = ctx.api.list_signups(raid_id).await?;
        if own_signup(&roster, Some(session.user_id)).is_some() {
            return Err(AppError::AlreadySignedUp(raid_id));
        }
        if is_full(&roster) {
            return Err(AppError::RosterFull(raid_id));
        }

        ctx.api
            .signup(session, raid_id, character.id)
            .await
            .map_err(|e| stale_on_404(e, format!("Raid {raid_id}")))?;
        info!(raid_id, character_id = character.id, "signed up");

        let roster = ctx.api.list_signups(raid_id).await?;
        Ok(JoinOutcome { character, roster })
    }

    /// Cancel the current user's own signup, then re-fetch the roster.
    pub async fn cancel(ctx: &AppContext, raid_id: i64) -> AppResult<Vec<SignupRecord>> {
        let session = ctx.session.require()?;
        let _pending = ctx.guard.try_begin(ActionKind::CancelSignup, Some(raid_id))?;

        let roster = ctx.api.list_signups(raid_id).await?;
        if own_signup(&roster, Some(session.user_id)).is_none() {
            return Err(AppError::Validation(format!(
                "You are not signed up for raid {raid_id}"
            )));
        }

        ctx.api
            .cancel_signup(session, raid_id)
            .await
            .map_err(|e| stale_on_404(e, format!("Signup for raid {raid_id}")))?;
        info!(raid_id, "signup cancelled");

        ctx.api.list_signups(raid_id).await
    }

    /// Create a raid. The form is checked before anything is sent; without an
    /// explicit character the default one is used.
    pub async fn create(
        ctx: &AppContext,
        draft: RaidDraft,
        character_id: Option<i64>,
    ) -> AppResult<Option<RaidEvent>> {
        draft.check()?;
        let session = ctx.session.require()?;
        let _pending = ctx.guard.try_begin(ActionKind::CreateRaid, None)?;

        let character_id = match character_id {
            Some(id) => Some(id),
            None => {
                let characters = ctx.api.list_characters(session).await?;
                character::preselect(&characters).map(|c| c.id)
            }
        };
        let req = draft.into_request(character_id)?;

        let created = ctx.api.create_raid(session, &req).await?;
        info!(title = %req.title, start = %req.start_time, "raid created");
        Ok(created)
    }

    pub async fn delete(ctx: &AppContext, raid_id: i64) -> AppResult<()> {
        let session = ctx.session.require()?;
        let _pending = ctx.guard.try_begin(ActionKind::DeleteRaid, Some(raid_id))?;

        ctx.api
            .delete_raid(session, raid_id)
            .await
            .map_err(|e| stale_on_404(e, format!("Raid {raid_id}")))?;
        info!(raid_id, "raid deleted");
        Ok(())
    }
}

/// Fetch every card's roster concurrently and patch the counts. A failed
/// fetch leaves its card's count unknown.
pub async fn refresh_counts(api: &ApiClient, board: &mut RaidBoard) {
    let ids = board.raid_ids();
    let results = join_all(ids.iter().map(|id| api.list_signups(*id))).await;

    for (id, result) in ids.into_iter().zip(results) {
        match result {
            Ok(signups) => {
                board.patch_count(id, signups.len());
            }
            Err(e) => warn!(raid_id = id, error = %e, "signup count unavailable"),
        }
    }
}

fn choose_character(characters: &[Character], wanted: Option<i64>) -> AppResult<&Character> {
    if characters.is_empty() {
        return Err(AppError::Validation(
            "Create a character first (rraid chars add --name <NAME>)".into(),
        ));
    }

    match wanted {
        Some(id) => characters
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::Validation(format!("You have no character with id {id}"))),
        None => character::preselect(characters).ok_or_else(|| {
            let choices = characters
                .iter()
                .map(|c| format!("{}: {}", c.id, c.summary()))
                .collect::<Vec<_>>()
                .join(", ");
            AppError::Validation(format!(
                "Choose a character with --character <ID> ({choices})"
            ))
        }),
    }
}

pub(crate) fn stale_on_404(e: AppError, what: String) -> AppError {
    match e {
        AppError::Api { status: 404, .. } => AppError::StaleView(what),
        other => other,
    }
}
