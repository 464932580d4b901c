//! Reset-week scheduling.
//!
//! Raids are grouped by a weekly cycle that starts every Thursday at 08:00
//! local time instead of at a calendar week boundary. Everything here is a
//! pure function of its inputs, generic over the time zone so that the CLI
//! runs on `Local` and tests on fixed offsets.

use chrono::{DateTime, Datelike, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike, Weekday};

use crate::models::RaidEvent;

pub const RESET_WEEKDAY: Weekday = Weekday::Thu;
pub const RESET_HOUR: u32 = 8;
pub const WINDOW_DAYS: i64 = 7;

fn reset_time() -> NaiveTime {
    NaiveTime::from_hms_opt(RESET_HOUR, 0, 0).unwrap_or_default()
}

/// Map a wall-clock time back onto the zone.
///
/// Ambiguous times (DST fold) take the earliest instant; a time that falls in
/// a DST gap is pushed past the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt;
    }
    tz.from_local_datetime(&(naive + TimeDelta::hours(1)))
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Start of the reset window containing `now`: the most recent Thursday
/// 08:00:00.000 that is not after `now`.
pub fn current_window_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let weekday = now.weekday().num_days_from_sunday() as i64;
    let reset = RESET_WEEKDAY.num_days_from_sunday() as i64;

    // Sunday..Wednesday: this week's Thursday is still ahead, go to last week's.
    let mut delta = if weekday < reset {
        reset - weekday - WINDOW_DAYS
    } else {
        reset - weekday
    };

    // Thursday before the reset hour still belongs to the previous window.
    if weekday == reset && now.hour() < RESET_HOUR {
        delta -= WINDOW_DAYS;
    }

    let date = now.date_naive() + TimeDelta::days(delta);
    resolve_local(&now.timezone(), date.and_time(reset_time()))
}

/// A half-open `[start, end)` reset window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetWindow<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> ResetWindow<Tz> {
    pub fn containing(now: &DateTime<Tz>) -> Self {
        let start = current_window_start(now);
        let end_naive = start.naive_local() + TimeDelta::days(WINDOW_DAYS);
        let end = resolve_local(&now.timezone(), end_naive);
        Self { start, end }
    }

    pub fn contains<Tz2: TimeZone>(&self, t: &DateTime<Tz2>) -> bool {
        *t >= self.start && *t < self.end
    }
}

/// Offset of `date` inside a Thursday-started week: Thu=0 .. Wed=6.
pub fn week_order<Tz: TimeZone>(date: &DateTime<Tz>) -> u8 {
    match date.weekday() {
        Weekday::Thu => 0,
        Weekday::Fri => 1,
        Weekday::Sat => 2,
        Weekday::Sun => 3,
        Weekday::Mon => 4,
        Weekday::Tue => 5,
        Weekday::Wed => 6,
    }
}

/// Short weekday name shown next to a raid ("Thu", "Fri", ...).
pub fn weekday_label<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%a").to_string()
}

/// Raids of the active window, in display order.
///
/// Order is by day-within-cycle first and exact start time second. The input
/// slice is left untouched.
pub fn visible_raids<Tz: TimeZone>(raids: &[RaidEvent], now: &DateTime<Tz>) -> Vec<RaidEvent> {
    let window = ResetWindow::containing(now);
    let tz = now.timezone();

    let mut out: Vec<RaidEvent> = raids
        .iter()
        .filter(|r| window.contains(&r.start_time))
        .cloned()
        .collect();

    out.sort_by_key(|r| (week_order(&r.start_time.with_timezone(&tz)), r.start_time));
    out
}

/// Every raid, chronologically, ignoring the reset window.
pub fn all_raids_sorted(raids: &[RaidEvent]) -> Vec<RaidEvent> {
    let mut out = raids.to_vec();
    out.sort_by_key(|r| r.start_time);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    // 2025-01-02 is a Thursday.
    fn tz() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        tz().with_ymd_and_hms(y, m, d, h, mi, s).unwrap()
    }

    fn raid(id: i64, start: DateTime<FixedOffset>) -> RaidEvent {
        RaidEvent {
            id,
            title: format!("boss {id}"),
            subtitle: None,
            boss: None,
            start_time: start.with_timezone(&Utc),
            created_by: None,
            created_by_name: None,
            created_at: None,
        }
    }

    #[test]
    fn window_start_for_every_weekday() {
        let expected = at(2025, 1, 2, 8, 0, 0);
        // Thursday after reset through the following Thursday before reset.
        for (d, h) in [(2, 8), (2, 23), (3, 12), (4, 0), (5, 9), (6, 18), (7, 1), (8, 23), (9, 7)] {
            let now = at(2025, 1, d, h, 0, 0);
            assert_eq!(current_window_start(&now), expected, "now = {now}");
        }
    }

    #[test]
    fn thursday_boundary() {
        let before = at(2025, 1, 9, 7, 59, 59);
        let exact = at(2025, 1, 9, 8, 0, 0);
        assert_eq!(current_window_start(&before), at(2025, 1, 2, 8, 0, 0));
        assert_eq!(current_window_start(&exact), exact);
    }

    #[test]
    fn window_start_is_deterministic_and_thursday_eight() {
        let mut t = at(2024, 12, 20, 0, 0, 0);
        let end = at(2025, 2, 20, 0, 0, 0);
        while t < end {
            let a = current_window_start(&t);
            let b = current_window_start(&t);
            assert_eq!(a, b);
            assert_eq!(a.weekday(), Weekday::Thu);
            assert_eq!((a.hour(), a.minute(), a.second(), a.nanosecond()), (8, 0, 0, 0));
            assert!(a <= t);
            assert!(t - a < TimeDelta::days(7));
            t += TimeDelta::minutes(97);
        }
    }

    #[test]
    fn windows_tile_the_timeline() {
        let base = at(2025, 1, 1, 0, 0, 0);
        let samples: Vec<_> = (0..(24 * 21 / 5)).map(|i| base + TimeDelta::hours(i * 5)).collect();
        for (i, t1) in samples.iter().enumerate() {
            for t2 in samples.iter().skip(i + 1) {
                if *t2 - *t1 >= TimeDelta::days(7) {
                    break;
                }
                let s1 = current_window_start(t1);
                let s2 = current_window_start(t2);
                if s1 != s2 {
                    assert!(*t2 >= s2);
                    assert!(*t1 < s2);
                    assert_eq!(s2 - s1, TimeDelta::days(7));
                }
                assert!(ResetWindow::containing(t1).contains(t1));
            }
        }
    }

    #[test]
    fn week_order_table() {
        assert_eq!(week_order(&at(2025, 1, 2, 12, 0, 0)), 0); // Thu
        assert_eq!(week_order(&at(2025, 1, 3, 12, 0, 0)), 1); // Fri
        assert_eq!(week_order(&at(2025, 1, 4, 12, 0, 0)), 2); // Sat
        assert_eq!(week_order(&at(2025, 1, 5, 12, 0, 0)), 3); // Sun
        assert_eq!(week_order(&at(2025, 1, 6, 12, 0, 0)), 4); // Mon
        assert_eq!(week_order(&at(2025, 1, 7, 12, 0, 0)), 5); // Tue
        assert_eq!(week_order(&at(2025, 1, 8, 12, 0, 0)), 6); // Wed
        assert_eq!(weekday_label(&at(2025, 1, 8, 12, 0, 0)), "Wed");
    }

    #[test]
    fn filter_is_inclusive_start_exclusive_end() {
        let now = at(2025, 1, 5, 10, 0, 0);
        let w = ResetWindow::containing(&now);
        let one = TimeDelta::seconds(1);
        let raids = vec![
            raid(1, w.start - one),
            raid(2, w.start),
            raid(3, w.end - one),
            raid(4, w.end),
        ];
        let ids: Vec<i64> = visible_raids(&raids, &now).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(raids.len(), 4);
    }

    #[test]
    fn sort_by_day_offset_then_time() {
        let now = at(2025, 1, 4, 10, 0, 0);
        let raids = vec![
            raid(1, at(2025, 1, 3, 20, 0, 0)), // Fri 20:00
            raid(2, at(2025, 1, 2, 21, 0, 0)), // Thu 21:00
            raid(3, at(2025, 1, 3, 9, 0, 0)),  // Fri 09:00
            raid(4, at(2025, 1, 8, 1, 0, 0)),  // Wed 01:00
        ];
        let ids: Vec<i64> = visible_raids(&raids, &now).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn empty_and_out_of_window_inputs() {
        let now = at(2025, 1, 4, 10, 0, 0);
        assert!(visible_raids(&[], &now).is_empty());
        let old = vec![raid(1, at(2024, 12, 1, 20, 0, 0))];
        assert!(visible_raids(&old, &now).is_empty());
        assert_eq!(all_raids_sorted(&old).len(), 1);
    }
}
