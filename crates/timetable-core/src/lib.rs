//! # Class Timetable Core Library
//!
//! This library derives "what is happening now" from a person's weekly class
//! timetable: the class currently running, the next one to start, and the
//! rest of today's classes, refreshed as time passes. The CLI and any other
//! front end are thin layers over the same core.
//!
//! ## Architecture
//!
//! - **Timetable**: JSON-backed week model and the validated, sorted
//!   [`ScheduleIndex`] built from it
//! - **Engine**: the pure [`recompute`] classification plus a
//!   [`ScheduleTracker`] that publishes versioned snapshots and a ticker
//!   that refreshes them on an interval
//! - **Loader**: a directory of per-person timetable documents
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`ScheduleIndex`]: day-keyed, time-sorted class lookups
//! - [`ScheduleStateEngine`]: current/upcoming/remaining classification
//! - [`ScheduleTracker`]: snapshot publication and person selection
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod engine;
pub mod error;
pub mod format;
pub mod loader;
pub mod storage;
pub mod timetable;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{
    recompute, spawn_ticker, CurrentClass, Published, ScheduleState, ScheduleStateEngine,
    ScheduleTracker, StartsIn, StateSnapshot, Ticker, UpcomingClass, RESUMES_LATER_SENTINEL,
};
pub use error::{ConfigError, CoreError, LoadError, Result, ValidationError};
pub use format::{format_clock, format_countdown, TimeFormat};
pub use loader::{load_index, FileTimetableLoader, Person, TimetableLoader};
pub use storage::Config;
pub use timetable::{ClassInfo, LenientBuild, ScheduleIndex, WeekTimetable};
