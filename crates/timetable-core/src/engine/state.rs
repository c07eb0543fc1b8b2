use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::format::format_countdown;
use crate::timetable::{day_name, ClassInfo};

/// Numeric stand-in for "resumes on a later day" in the legacy seconds field.
pub const RESUMES_LATER_SENTINEL: i64 = -1;

/// When the upcoming class starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StartsIn {
    /// Later today, in whole seconds from now.
    Today { secs: i64 },
    /// On a later day; no countdown is computed.
    LaterDay { day: Weekday, days_ahead: u8 },
}

impl StartsIn {
    /// Countdown seconds when the class is today.
    pub fn seconds(&self) -> Option<i64> {
        match *self {
            StartsIn::Today { secs } => Some(secs),
            StartsIn::LaterDay { .. } => None,
        }
    }

    /// Seconds, or [`RESUMES_LATER_SENTINEL`] for a later day.
    pub fn as_legacy_secs(&self) -> i64 {
        self.seconds().unwrap_or(RESUMES_LATER_SENTINEL)
    }

    /// Display label: a countdown for today, otherwise "Tomorrow" or the day name.
    pub fn label(&self) -> String {
        match *self {
            StartsIn::Today { secs } => format_countdown(secs),
            StartsIn::LaterDay { days_ahead: 1, .. } => "Tomorrow".to_string(),
            StartsIn::LaterDay { day, .. } => day_name(day).to_string(),
        }
    }
}

/// The class running right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentClass {
    pub class: ClassInfo,
    /// Whole seconds until the class ends.
    pub ends_in_secs: i64,
}

/// The next class to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingClass {
    pub class: ClassInfo,
    pub starts_in: StartsIn,
}

/// Classification of a timetable at one instant.
///
/// Rebuilt wholesale on every recompute; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleState {
    pub today: Weekday,
    pub current: Option<CurrentClass>,
    pub upcoming: Option<UpcomingClass>,
    /// Today's classes after the upcoming one, by start time.
    pub remaining: Vec<ClassInfo>,
    pub is_class_running: bool,
}

impl ScheduleState {
    /// State with nothing running and nothing scheduled.
    pub fn idle(today: Weekday) -> Self {
        Self {
            today,
            current: None,
            upcoming: None,
            remaining: Vec::new(),
            is_class_running: false,
        }
    }

    pub fn current_class(&self) -> Option<&ClassInfo> {
        self.current.as_ref().map(|c| &c.class)
    }

    pub fn upcoming_class(&self) -> Option<&ClassInfo> {
        self.upcoming.as_ref().map(|u| &u.class)
    }

    /// Seconds left in the current class, 0 when nothing runs.
    pub fn current_remaining_secs(&self) -> i64 {
        self.current.as_ref().map(|c| c.ends_in_secs).unwrap_or(0)
    }

    /// Seconds until the upcoming class; -1 for a later day, 0 when none.
    pub fn upcoming_starts_in_secs(&self) -> i64 {
        self.upcoming
            .as_ref()
            .map(|u| u.starts_in.as_legacy_secs())
            .unwrap_or(0)
    }

    /// True when there is neither a current nor an upcoming class.
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.upcoming.is_none()
    }
}
