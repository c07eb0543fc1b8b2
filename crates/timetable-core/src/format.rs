//! Display helpers for countdowns and class times.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Clock style for rendering class times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    #[default]
    H24,
    H12,
}

impl TimeFormat {
    pub fn from_24_hour(use_24_hour: bool) -> Self {
        if use_24_hour {
            Self::H24
        } else {
            Self::H12
        }
    }
}

/// `MM:SS` under an hour, `HH:MM:SS` otherwise. Negative input clamps to zero.
pub fn format_countdown(secs: i64) -> String {
    let secs = secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// `14:05` or `2:05 PM`.
pub fn format_clock(time: NaiveTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::H24 => time.format("%H:%M").to_string(),
        TimeFormat::H12 => {
            let (pm, hour) = time.hour12();
            let suffix = if pm { "PM" } else { "AM" };
            format!("{hour}:{:02} {suffix}", time.minute())
        }
    }
}
