//! Raid board: the list view with eventually-consistent signup counts.
//!
//! The board is first built with unknown counts, then each card is patched
//! as its roster fetch completes. A card whose fetch failed keeps an unknown
//! count; the other cards are unaffected.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::core::roster::ROSTER_CAPACITY;
use crate::core::schedule;
use crate::models::RaidEvent;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidCard {
    #[serde(flatten)]
    pub raid: RaidEvent,
    /// Cached roster size; not authoritative.
    pub signup_count: Option<usize>,
}

impl RaidCard {
    pub fn new(raid: RaidEvent) -> Self {
        Self {
            raid,
            signup_count: None,
        }
    }

    /// Unknown counts are treated as empty rosters.
    pub fn is_full(&self) -> bool {
        self.signup_count.unwrap_or(0) >= ROSTER_CAPACITY
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RaidBoard {
    pub cards: Vec<RaidCard>,
}

impl RaidBoard {
    /// Cards for the reset window containing `now`, in display order.
    pub fn for_window<Tz: TimeZone>(raids: &[RaidEvent], now: &DateTime<Tz>) -> Self {
        Self::from_ordered(schedule::visible_raids(raids, now))
    }

    /// Cards for every raid, chronologically.
    pub fn for_all(raids: &[RaidEvent]) -> Self {
        Self::from_ordered(schedule::all_raids_sorted(raids))
    }

    fn from_ordered(raids: Vec<RaidEvent>) -> Self {
        Self {
            cards: raids.into_iter().map(RaidCard::new).collect(),
        }
    }

    pub fn raid_ids(&self) -> Vec<i64> {
        self.cards.iter().map(|c| c.raid.id).collect()
    }

    /// Patch one card's count. Returns false when the raid is not on the board.
    pub fn patch_count(&mut self, raid_id: i64, count: usize) -> bool {
        match self.cards.iter_mut().find(|c| c.raid.id == raid_id) {
            Some(card) => {
                card.signup_count = Some(count);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
}
