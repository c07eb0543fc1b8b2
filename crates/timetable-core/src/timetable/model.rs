//! Timetable data types.
//!
//! A timetable is stored as one JSON document per person:
//!
//! ```text
//! { "timetable": { "MONDAY": [ { "slot": "A1", "courseCode": "CS101",
//!   "courseTitle": "Intro", "start": "09:00", "end": "10:00", "venue": "LT-1" } ] } }
//! ```
//!
//! Day keys are matched case-insensitively and may be abbreviated. Times are
//! local wall-clock `HH:MM` values with no date attached.

use std::collections::HashMap;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The seven weekdays, Monday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Upper-case key used for a day in timetable documents.
pub fn day_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// Human-readable day name ("Monday").
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a day key such as `MONDAY`, `monday` or `Mon`.
pub fn parse_weekday(value: &str) -> Result<Weekday, ValidationError> {
    let day = match value.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return Err(ValidationError::UnknownDay(value.to_string())),
    };
    Ok(day)
}

/// Parse a wall-clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_time(value: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidTime {
            value: value.to_string(),
        })
}

/// One scheduled session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    /// Slot label from the timetable grid. Not necessarily unique.
    pub slot: String,
    pub course_code: String,
    pub course_title: String,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    #[serde(default)]
    pub venue: String,
}

impl ClassInfo {
    /// Build a class from `HH:MM` strings.
    pub fn new(
        slot: impl Into<String>,
        course_code: impl Into<String>,
        course_title: impl Into<String>,
        start: &str,
        end: &str,
        venue: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            slot: slot.into(),
            course_code: course_code.into(),
            course_title: course_title.into(),
            start: parse_time(start)?,
            end: parse_time(end)?,
            venue: venue.into(),
        })
    }

    /// True when the interval is non-empty (start < end).
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Whether `time` falls in `[start, end)`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }

    /// Whether two classes share any instant.
    pub fn overlaps(&self, other: &ClassInfo) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A week of classes keyed by weekday. Missing days are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTimetable {
    #[serde(rename = "timetable", default, with = "day_map")]
    days: HashMap<Weekday, Vec<ClassInfo>>,
}

impl WeekTimetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a timetable document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builder-style helper replacing the classes of `day`.
    pub fn with_day(mut self, day: Weekday, classes: Vec<ClassInfo>) -> Self {
        self.days.insert(day, classes);
        self
    }

    /// Append a class to `day`, keeping input order.
    pub fn push(&mut self, day: Weekday, class: ClassInfo) {
        self.days.entry(day).or_default().push(class);
    }

    /// Classes for `day` in input order.
    pub fn day(&self, day: Weekday) -> &[ClassInfo] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn class_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.class_count() == 0
    }

    /// Consume the timetable, yielding each day Monday first.
    pub(crate) fn into_days(mut self) -> impl Iterator<Item = (Weekday, Vec<ClassInfo>)> {
        WEEK.into_iter()
            .map(move |day| (day, self.days.remove(&day).unwrap_or_default()))
    }
}

mod hhmm {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        let text = if time.second() == 0 {
            time.format("%H:%M").to_string()
        } else {
            time.format("%H:%M:%S").to_string()
        };
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

mod day_map {
    use super::*;
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        days: &HashMap<Weekday, Vec<ClassInfo>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(days.len()))?;
        for day in WEEK {
            if let Some(classes) = days.get(&day) {
                map.serialize_entry(day_key(day), classes)?;
            }
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<Weekday, Vec<ClassInfo>>, D::Error> {
        // Deserialized as ordered pairs so that duplicate spellings of a day
        // merge in document order.
        let raw: Vec<(String, Vec<ClassInfo>)> = deserializer
            .deserialize_map(PairsVisitor)?;
        let mut days: HashMap<Weekday, Vec<ClassInfo>> = HashMap::new();
        for (key, classes) in raw {
            let day = parse_weekday(&key).map_err(serde::de::Error::custom)?;
            days.entry(day).or_default().extend(classes);
        }
        Ok(days)
    }

    struct PairsVisitor;

    impl<'de> serde::de::Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, Vec<ClassInfo>)>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a map of weekday names to class lists")
        }

        fn visit_map<A: serde::de::MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::new();
            while let Some(entry) = access.next_entry::<String, Vec<ClassInfo>>()? {
                pairs.push(entry);
            }
            Ok(pairs)
        }
    }
}
