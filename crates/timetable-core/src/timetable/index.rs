//! Validated, day-keyed view over a week of classes.
//!
//! The index owns the timetable once built. Each day's classes are sorted by
//! start time (stable, so equal starts keep input order) and every entry is
//! guaranteed to satisfy `start < end`.

use chrono::Weekday;
use serde::Serialize;

use super::model::{ClassInfo, WeekTimetable, WEEK};
use crate::error::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleIndex {
    days: [Vec<ClassInfo>; 7],
}

/// Result of a lenient build: the index plus the entries that were dropped.
#[derive(Debug, Clone)]
pub struct LenientBuild {
    pub index: ScheduleIndex,
    pub dropped: Vec<ValidationError>,
}

impl ScheduleIndex {
    /// Build an index, rejecting the whole timetable on the first malformed
    /// interval.
    pub fn build(timetable: WeekTimetable) -> Result<Self, ValidationError> {
        let mut index = Self::default();
        for (day, classes) in timetable.into_days() {
            if let Some(bad) = classes.iter().find(|c| !c.is_well_formed()) {
                return Err(invalid_range(day, bad));
            }
            index.insert_sorted(day, classes);
        }
        Ok(index)
    }

    /// Build an index, dropping malformed intervals instead of failing.
    ///
    /// Timetables are hand-written and may contain mistakes; one bad entry
    /// should not hide the rest of the week. Overlapping classes are kept but
    /// logged, since only the earliest-starting one can ever be reported as
    /// current.
    pub fn build_lenient(timetable: WeekTimetable) -> LenientBuild {
        let mut index = Self::default();
        let mut dropped = Vec::new();

        for (day, classes) in timetable.into_days() {
            let (kept, bad): (Vec<_>, Vec<_>) =
                classes.into_iter().partition(ClassInfo::is_well_formed);
            for class in &bad {
                let err = invalid_range(day, class);
                tracing::warn!(%err, "dropping malformed class");
                dropped.push(err);
            }
            index.insert_sorted(day, kept);
            index.warn_overlaps(day);
        }

        LenientBuild { index, dropped }
    }

    /// Classes for `day`, ascending by start time.
    pub fn classes_for(&self, day: Weekday) -> &[ClassInfo] {
        &self.days[slot(day)]
    }

    /// First day after `after` (wrapping Sunday to Monday) that has classes.
    ///
    /// Visits each of the other six days at most once and never returns
    /// `after` itself, so an all-empty week yields `None`.
    pub fn next_non_empty_day(&self, after: Weekday) -> Option<(Weekday, &[ClassInfo])> {
        let mut day = after;
        for _ in 0..6 {
            day = day.succ();
            let classes = self.classes_for(day);
            if !classes.is_empty() {
                return Some((day, classes));
            }
        }
        None
    }

    /// Every day with its classes, Monday first.
    pub fn week(&self) -> impl Iterator<Item = (Weekday, &[ClassInfo])> + '_ {
        WEEK.into_iter().map(move |day| (day, self.classes_for(day)))
    }

    pub fn class_count(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    fn insert_sorted(&mut self, day: Weekday, mut classes: Vec<ClassInfo>) {
        // sort_by_key is stable: equal starts keep input order.
        classes.sort_by_key(|c| c.start);
        self.days[slot(day)] = classes;
    }

    /// Pairs of classes on `day` that share some instant, earlier start first.
    pub fn overlapping_pairs(&self, day: Weekday) -> Vec<(&ClassInfo, &ClassInfo)> {
        let classes = self.classes_for(day);
        let mut pairs = Vec::new();
        for (i, a) in classes.iter().enumerate() {
            // Sorted by start: the first class clear of `a` ends the scan.
            for b in classes[i + 1..].iter().take_while(|b| a.overlaps(b)) {
                pairs.push((a, b));
            }
        }
        pairs
    }

    fn warn_overlaps(&self, day: Weekday) {
        for (a, b) in self.overlapping_pairs(day) {
            tracing::warn!(
                day = %day,
                first = %a.slot,
                second = %b.slot,
                "overlapping classes; the earlier start wins while both run"
            );
        }
    }
}

fn slot(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

fn invalid_range(day: Weekday, class: &ClassInfo) -> ValidationError {
    ValidationError::InvalidTimeRange {
        day,
        slot: class.slot.clone(),
        start: class.start,
        end: class.end,
    }
}
