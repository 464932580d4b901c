//! Text views for raids, rosters and characters.

use chrono::Local;

use crate::core::board::RaidBoard;
use crate::core::roster::{Badge, RosterView};
use crate::core::schedule::{ResetWindow, week_order, weekday_label};
use crate::models::Character;
use crate::utils::colors;
use crate::utils::date::format_local;
use crate::utils::formatting::{level, or_unset};
use crate::utils::table::Table;

pub fn board(board: &RaidBoard, time_format: &str) -> String {
    let mut t = Table::new(vec!["ID", "Day", "Time", "Boss", "Note", "Creator", "Signups"]);

    for card in &board.cards {
        let local = card.raid.start_time.with_timezone(&Local);
        t.add_row(vec![
            card.raid.id.to_string(),
            colors::weekday(&weekday_label(&local), week_order(&local)),
            format_local(&card.raid.start_time, time_format),
            card.raid.title.clone(),
            or_unset(card.raid.subtitle.as_deref()),
            card.raid.creator_label().to_string(),
            colors::signup_count(card.signup_count),
        ]);
    }

    t.render()
}

pub fn roster(view: &RosterView<'_>, raid_id: i64) -> String {
    let mut out = format!("Signups: {}/{}\n", view.len(), view.capacity);

    for line in &view.lines {
        let s = line.signup;
        let badge = match &line.badge {
            Badge::Position(n) => format!("#{n}"),
            Badge::Picture(_) => "[avatar]".to_string(),
        };
        out.push_str(&format!(
            "  {:<8} {}  player: {}  {} {}",
            badge,
            s.character_name,
            or_unset(s.user_name.as_deref()),
            or_unset(s.job.as_deref()),
            level(s.level),
        ));
        if line.mine {
            out.push_str(&format!(
                "  {}",
                colors::mine(&format!("(you) cancel with: rraid raids cancel {raid_id}"))
            ));
        }
        out.push('\n');
    }

    if view.full {
        out.push_str(&colors::dim("Roster is full; joining is unavailable.\n"));
    }
    out
}

pub fn characters(list: &[Character], time_format: &str) -> String {
    let mut t = Table::new(vec!["ID", "Name", "Job", "Level", "Default", "Created"]);
    for c in list {
        t.add_row(vec![
            c.id.to_string(),
            c.name.clone(),
            or_unset(c.job.as_deref()),
            level(c.level),
            if c.is_default { "*".into() } else { String::new() },
            c.created_at
                .map(|t| format_local(&t, time_format))
                .unwrap_or_else(|| "-".into()),
        ]);
    }
    t.render()
}

pub fn window(w: &ResetWindow<Local>) -> String {
    format!(
        "Current reset window: {} -> {} (resets every Thursday 08:00)",
        w.start.format("%a %Y-%m-%d %H:%M"),
        w.end.format("%a %Y-%m-%d %H:%M"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SignupRecord;

    fn signup(user_id: i64, name: &str) -> SignupRecord {
        SignupRecord {
            id: None,
            character_id: user_id,
            character_name: name.into(),
            job: Some("Hero".into()),
            level: Some(200),
            user_id,
            user_name: Some(format!("player{user_id}")),
            user_picture: None,
            status: None,
        }
    }

    #[test]
    fn roster_marks_only_own_line() {
        let list = vec![signup(1, "Aria"), signup(2, "Bram")];
        let view = RosterView::build(&list, Some(2));
        let out = roster(&view, 5);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("Signups: 2/6"));
        assert!(lines[1].contains("#1") && !lines[1].contains("cancel"));
        assert!(lines[2].contains("#2") && lines[2].contains("rraid raids cancel 5"));
    }

    #[test]
    fn roster_full_note() {
        let list: Vec<_> = (1..=6).map(|u| signup(u, "x")).collect();
        let out = roster(&RosterView::build(&list, None), 1);
        assert!(out.contains("joining is unavailable"));
    }
}
