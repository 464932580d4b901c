use tracing::info;

use crate::core::context::AppContext;
use crate::core::guard::ActionKind;
use crate::core::raids::stale_on_404;
use crate::core::validate;
use crate::errors::{AppError, AppResult};
use crate::models::{Character, CharacterForm};

/// Fields to change on an existing character; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct CharacterPatch {
    pub name: Option<String>,
    pub job: Option<String>,
    pub level: Option<i32>,
    pub is_default: Option<bool>,
}

impl CharacterPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.job.is_none() && self.level.is_none() && self.is_default.is_none()
    }

    pub fn apply(&self, current: &Character) -> AppResult<CharacterForm> {
        let base = CharacterForm::from(current);
        validate::character_form(
            self.name.as_deref().unwrap_or(&base.name),
            self.job.as_deref().or(base.job.as_deref()),
            self.level.or(base.level),
            self.is_default.unwrap_or(base.is_default),
        )
    }
}

pub struct CharacterLogic;

impl CharacterLogic {
    pub async fn list(ctx: &AppContext) -> AppResult<Vec<Character>> {
        let session = ctx.session.require()?;
        ctx.api.list_characters(session).await
    }

    /// Create and return the refreshed list.
    pub async fn create(ctx: &AppContext, form: CharacterForm) -> AppResult<Vec<Character>> {
        let session = ctx.session.require()?;
        let _pending = ctx.guard.try_begin(ActionKind::CreateCharacter, None)?;

        ctx.api.create_character(session, &form).await?;
        info!(name = %form.name, "character created");
        ctx.api.list_characters(session).await
    }

    /// Apply `patch` to character `id` and return the refreshed list.
    pub async fn update(
        ctx: &AppContext,
        id: i64,
        patch: CharacterPatch,
    ) -> AppResult<Vec<Character>> {
        if patch.is_empty() {
            return Err(AppError::Validation("Nothing to update".into()));
        }
        let session = ctx.session.require()?;
        let _pending = ctx.guard.try_begin(ActionKind::UpdateCharacter, Some(id))?;

        let characters = ctx.api.list_characters(session).await?;
        let current = characters
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::StaleView(format!("Character {id}")))?;
        let form = patch.apply(current)?;

        ctx.api
            .update_character(session, id, &form)
            .await
            .map_err(|e| stale_on_404(e, format!("Character {id}")))?;
        info!(id, "character updated");
        ctx.api.list_characters(session).await
    }

    pub async fn delete(ctx: &AppContext, id: i64) -> AppResult<Vec<Character>> {
        let session = ctx.session.require()?;
        let _pending = ctx.guard.try_begin(ActionKind::DeleteCharacter, Some(id))?;

        ctx.api
            .delete_character(session, id)
            .await
            .map_err(|e| stale_on_404(e, format!("Character {id}")))?;
        info!(id, "character deleted");
        ctx.api.list_characters(session).await
    }
}
