//! Live class state: derivation, publication and periodic refresh.
//!
//! - [`recompute`]: pure classification of an index at an instant
//! - [`ScheduleTracker`]: owns the selected timetable and publishes
//!   versioned snapshots over a `watch` channel
//! - [`spawn_ticker`]: drives `ScheduleTracker::refresh` on an interval

mod compute;
mod state;
mod tracker;


pub use compute::{recompute, ScheduleStateEngine};
pub use state::{CurrentClass, ScheduleState, StartsIn, UpcomingClass, RESUMES_LATER_SENTINEL};
pub use tracker::{spawn_ticker, Published, ScheduleTracker, StateSnapshot, Ticker};
