use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::errors::{AppError, AppResult};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Parse a wall-clock date/time in `tz`.
///
/// Accepts RFC 3339 (explicit offset), `YYYY-MM-DD HH:MM[:SS]` (also with a
/// `T` separator) and a bare `YYYY-MM-DD` meaning midnight.
pub fn parse_datetime_in<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(tz));
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive).earliest()
}

pub fn parse_local(s: &str) -> AppResult<DateTime<Local>> {
    parse_datetime_in(s, &Local).ok_or_else(|| {
        AppError::InvalidDate(format!("'{s}' (expected YYYY-MM-DD HH:MM or RFC 3339)"))
    })
}

/// Render an instant in local time with the configured pattern.
pub fn format_local(t: &DateTime<Utc>, pattern: &str) -> String {
    t.with_timezone(&Local).format(pattern).to_string()
}
