//! Client-side form validation. Runs before any request is sent.

use chrono::{DateTime, Utc};

use crate::errors::{AppError, AppResult};
use crate::models::{CharacterForm, CreateRaidRequest};

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn character_form(
    name: &str,
    job: Option<&str>,
    level: Option<i32>,
    is_default: bool,
) -> AppResult<CharacterForm> {
    let name = non_blank(Some(name))
        .ok_or_else(|| AppError::Validation("Character name is required".into()))?;

    if let Some(l) = level
        && l < 1
    {
        return Err(AppError::Validation(format!(
            "Level must be a positive number (got {l})"
        )));
    }

    Ok(CharacterForm {
        name,
        job: non_blank(job),
        level,
        is_default,
    })
}

/// Fields of the "create raid" form; the character may still be unresolved.
#[derive(Debug, Clone, Default)]
pub struct RaidDraft {
    pub boss: String,
    pub subtitle: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
}

impl RaidDraft {
    /// Check the fields that do not need the network.
    pub fn check(&self) -> AppResult<()> {
        if self.boss.trim().is_empty() {
            return Err(AppError::Validation("Please choose a boss".into()));
        }
        if self.start_time.is_none() {
            return Err(AppError::Validation("Please choose a start time".into()));
        }
        Ok(())
    }

    pub fn into_request(self, character_id: Option<i64>) -> AppResult<CreateRaidRequest> {
        self.check()?;
        let character_id = character_id
            .ok_or_else(|| AppError::Validation("Please choose a character to join with".into()))?;
        let start_time = self
            .start_time
            .ok_or_else(|| AppError::Validation("Please choose a start time".into()))?;
        let boss = self.boss.trim().to_string();

        Ok(CreateRaidRequest {
            title: boss.clone(),
            subtitle: non_blank(self.subtitle.as_deref()),
            boss,
            start_time,
            character_id,
        })
    }
}
