//! Weekly timetable model and the sorted, validated index built from it.

mod index;
mod model;

pub use index::{LenientBuild, ScheduleIndex};
pub use model::{day_key, day_name, parse_time, parse_weekday, ClassInfo, WeekTimetable, WEEK};
