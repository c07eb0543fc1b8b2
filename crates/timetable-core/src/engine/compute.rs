//! Live schedule state derivation.
//!
//! `recompute` is a pure function of the index and the local wall-clock
//! instant. It is total: an empty day or an empty week is a valid state.
//!
//! ## Classification
//!
//! ```text
//! start <= now < end   -> current   (first in start order wins)
//! now < start          -> upcoming  (first), then remaining
//! now >= end           -> past      (dropped)
//! ```
//!
//! With nothing current and nothing left today, the first class of the next
//! non-empty day becomes upcoming, tagged [`StartsIn::LaterDay`].

use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};

use super::state::{CurrentClass, ScheduleState, StartsIn, UpcomingClass};
use crate::timetable::ScheduleIndex;

/// Classify `index` at `now`.
pub fn recompute(index: &ScheduleIndex, now: NaiveDateTime) -> ScheduleState {
    let today = now.weekday();
    let time = now.time();

    let mut state = ScheduleState::idle(today);

    for class in index.classes_for(today) {
        if class.contains(time) {
            // Overlaps: keep the earliest-starting running class.
            if state.current.is_none() {
                state.current = Some(CurrentClass {
                    class: class.clone(),
                    ends_in_secs: seconds_between(time, class.end),
                });
            }
        } else if time < class.start {
            if state.upcoming.is_none() {
                state.upcoming = Some(UpcomingClass {
                    class: class.clone(),
                    starts_in: StartsIn::Today {
                        secs: seconds_between(time, class.start),
                    },
                });
            } else {
                state.remaining.push(class.clone());
            }
        }
    }

    if state.is_idle() {
        if let Some((day, classes)) = index.next_non_empty_day(today) {
            state.upcoming = classes.first().map(|class| UpcomingClass {
                class: class.clone(),
                starts_in: StartsIn::LaterDay {
                    day,
                    days_ahead: days_ahead(today, day),
                },
            });
        }
    }

    state.is_class_running = state.current.is_some();
    state
}

/// Recompute engine bound to one person's index.
#[derive(Debug, Clone)]
pub struct ScheduleStateEngine {
    index: Arc<ScheduleIndex>,
}

impl ScheduleStateEngine {
    pub fn new(index: impl Into<Arc<ScheduleIndex>>) -> Self {
        Self {
            index: index.into(),
        }
    }

    pub fn index(&self) -> &ScheduleIndex {
        &self.index
    }

    pub fn recompute(&self, now: NaiveDateTime) -> ScheduleState {
        recompute(&self.index, now)
    }
}

/// Whole seconds from `from` to `to`, truncating sub-second remainders.
fn seconds_between(from: NaiveTime, to: NaiveTime) -> i64 {
    (to - from).num_seconds()
}

fn days_ahead(from: Weekday, to: Weekday) -> u8 {
    let diff = (7 + to.num_days_from_monday() - from.num_days_from_monday()) % 7;
    diff as u8
}
