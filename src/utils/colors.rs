//! ANSI color helpers for terminal output.
use ansi_term::Colour;

use crate::core::roster::ROSTER_CAPACITY;

/// "n/6" for a raid card: red when full, green otherwise, grey when unknown.
pub fn signup_count(count: Option<usize>) -> String {
    match count {
        Some(n) if n >= ROSTER_CAPACITY => Colour::Red
            .bold()
            .paint(format!("{n}/{ROSTER_CAPACITY} FULL"))
            .to_string(),
        Some(n) => Colour::Green.paint(format!("{n}/{ROSTER_CAPACITY}")).to_string(),
        None => Colour::Fixed(244).paint(format!("?/{ROSTER_CAPACITY}")).to_string(),
    }
}

/// Weekday names tinted by their position in the reset week.
pub fn weekday(label: &str, order: u8) -> String {
    let colour = match order {
        0 => Colour::Yellow,
        1..=2 => Colour::Cyan,
        3 => Colour::Purple,
        _ => Colour::Blue,
    };
    colour.paint(label).to_string()
}

pub fn mine(text: &str) -> String {
    Colour::Green.bold().paint(text).to_string()
}

pub fn dim(text: &str) -> String {
    Colour::Fixed(244).paint(text).to_string()
}
