//! Disable-while-pending guard.
//!
//! A mutating action holds a [`PendingAction`] for its whole lifetime; a
//! second submission of the same action on the same entity is refused until
//! the first one settles, whatever its outcome.
//!
//! The guard lives in one [`AppContext`](crate::core::context::AppContext)
//! and only covers actions issued through that context. The CLI builds a
//! fresh context per invocation, so two separate `rraid` processes are not
//! serialized against each other.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Signup,
    CancelSignup,
    CreateRaid,
    DeleteRaid,
    CreateCharacter,
    UpdateCharacter,
    DeleteCharacter,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Signup => "signup",
            ActionKind::CancelSignup => "cancel signup",
            ActionKind::CreateRaid => "create raid",
            ActionKind::DeleteRaid => "delete raid",
            ActionKind::CreateCharacter => "create character",
            ActionKind::UpdateCharacter => "update character",
            ActionKind::DeleteCharacter => "delete character",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionKey {
    pub kind: ActionKind,
    pub entity: Option<i64>,
}

impl ActionKey {
    pub fn new(kind: ActionKind, entity: Option<i64>) -> Self {
        Self { kind, entity }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entity {
            Some(id) => write!(f, "{} #{}", self.kind.as_str(), id),
            None => f.write_str(self.kind.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionGuard {
    inflight: Arc<Mutex<HashSet<ActionKey>>>,
}

impl ActionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self, kind: ActionKind, entity: Option<i64>) -> AppResult<PendingAction> {
        let key = ActionKey::new(kind, entity);
        let mut set = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(key) {
            return Err(AppError::ActionPending(key.to_string()));
        }
        tracing::debug!(action = %key, "action started");
        Ok(PendingAction {
            guard: self.clone(),
            key,
        })
    }

    pub fn is_pending(&self, kind: ActionKind, entity: Option<i64>) -> bool {
        let set = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
        set.contains(&ActionKey::new(kind, entity))
    }
}

/// Releases its key when dropped.
#[derive(Debug)]
pub struct PendingAction {
    guard: ActionGuard,
    key: ActionKey,
}

impl Drop for PendingAction {
    fn drop(&mut self) {
        let mut set = self.guard.inflight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.key);
        tracing::debug!(action = %self.key, "action settled");
    }
}
