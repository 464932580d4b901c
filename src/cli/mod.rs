pub mod commands;
pub mod parser;

use chrono::{DateTime, Local};

use crate::errors::AppResult;
use crate::utils::date;

/// "Now" for window computations: `--at` when given, else the clock.
pub fn resolve_now(at: Option<&str>) -> AppResult<DateTime<Local>> {
    match at {
        Some(s) => date::parse_local(s),
        None => Ok(date::now()),
    }
}
