//! Roster display rules for a single raid.

use crate::models::SignupRecord;

/// Maximum number of signups a raid accepts.
pub const ROSTER_CAPACITY: usize = 6;

pub fn is_full(signups: &[SignupRecord]) -> bool {
    signups.len() >= ROSTER_CAPACITY
}

/// The current user's own signup, if any.
pub fn own_signup(signups: &[SignupRecord], user_id: Option<i64>) -> Option<&SignupRecord> {
    let uid = user_id?;
    signups.iter().find(|s| s.user_id == uid)
}

/// What the avatar slot of a roster line shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    Picture(String),
    Position(usize),
}

/// One roster entry ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterLine<'a> {
    pub signup: &'a SignupRecord,
    pub badge: Badge,
    /// Only the current user's own entry can be cancelled.
    pub mine: bool,
}

/// Roster of one raid as the current user sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterView<'a> {
    pub lines: Vec<RosterLine<'a>>,
    pub full: bool,
    pub capacity: usize,
}

impl<'a> RosterView<'a> {
    /// Build the view in fetch order. At most one line is marked as mine.
    pub fn build(signups: &'a [SignupRecord], user_id: Option<i64>) -> Self {
        let mut mine_taken = false;
        let lines = signups
            .iter()
            .enumerate()
            .map(|(idx, s)| {
                let mine = !mine_taken && user_id == Some(s.user_id);
                mine_taken |= mine;
                let badge = match s.user_picture.as_deref().filter(|p| !p.trim().is_empty()) {
                    Some(url) => Badge::Picture(url.to_string()),
                    None => Badge::Position(idx + 1),
                };
                RosterLine {
                    signup: s,
                    badge,
                    mine,
                }
            })
            .collect();

        Self {
            lines,
            full: is_full(signups),
            capacity: ROSTER_CAPACITY,
        }
    }

    pub fn can_join(&self) -> bool {
        !self.full
    }

    pub fn mine(&self) -> Option<&RosterLine<'a>> {
        self.lines.iter().find(|l| l.mine)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
