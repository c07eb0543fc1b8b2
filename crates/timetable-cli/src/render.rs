//! Plain-text rendering of class state and the weekly timetable.

use std::fmt::Write;

use timetable_core::timetable::day_name;
use timetable_core::{
    format_clock, format_countdown, ClassInfo, ScheduleIndex, StartsIn, StateSnapshot, TimeFormat,
};

fn class_line(class: &ClassInfo, fmt: TimeFormat) -> String {
    let mut line = format!(
        "{:<8} {}  {}-{}",
        class.course_code,
        class.course_title,
        format_clock(class.start, fmt),
        format_clock(class.end, fmt),
    );
    if !class.venue.is_empty() {
        let _ = write!(line, "  @ {}", class.venue);
    }
    line
}

pub fn snapshot(snap: &StateSnapshot, fmt: TimeFormat) -> String {
    let state = &snap.state;
    let mut out = String::new();

    let who = snap.person.as_deref().unwrap_or("-");
    let _ = writeln!(
        out,
        "{} {} ({who})",
        day_name(state.today),
        format_clock(snap.computed_at.time(), fmt)
    );

    if let Some(current) = &state.current {
        let _ = writeln!(out, "  now    {}", class_line(&current.class, fmt));
        let _ = writeln!(out, "         ends in {}", format_countdown(current.ends_in_secs));
    }

    match &state.upcoming {
        Some(upcoming) => {
            let _ = writeln!(out, "  next   {}", class_line(&upcoming.class, fmt));
            let when = match upcoming.starts_in {
                StartsIn::Today { secs } => format!("starts in {}", format_countdown(secs)),
                StartsIn::LaterDay { .. } => upcoming.starts_in.label(),
            };
            let _ = writeln!(out, "         {when}");
        }
        None if state.current.is_none() => {
            let _ = writeln!(out, "  No more classes scheduled for today");
        }
        None => {}
    }

    for class in &state.remaining {
        let _ = writeln!(out, "  later  {}", class_line(class, fmt));
    }
    out
}

pub fn week(index: &ScheduleIndex, fmt: TimeFormat) -> String {
    let mut out = String::new();
    for (day, classes) in index.week() {
        let _ = writeln!(out, "{}", day_name(day));
        if classes.is_empty() {
            let _ = writeln!(out, "  (no classes)");
        }
        for class in classes {
            let _ = writeln!(out, "  {:<6} {}", class.slot, class_line(class, fmt));
        }
    }
    out
}
