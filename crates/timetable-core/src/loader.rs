//! Timetable repository.
//!
//! One JSON document per person lives in a timetables directory; the file
//! stem is the person's display name (`Jitish.json` -> "Jitish").

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result};
use crate::timetable::{ScheduleIndex, WeekTimetable};

const TIMETABLE_EXT: &str = "json";

/// Someone whose timetable can be selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub file_name: String,
}

impl Person {
    /// Person for a timetable file name, e.g. `Rahul.json`.
    pub fn from_file_name(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let name = Path::new(&file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone());
        Self { name, file_name }
    }
}

/// Source of timetables for people.
pub trait TimetableLoader: Send + Sync {
    fn load(&self, person: &Person) -> impl Future<Output = Result<WeekTimetable, LoadError>> + Send;
}

/// Loads timetables from `<dir>/<file_name>`.
#[derive(Debug, Clone)]
pub struct FileTimetableLoader {
    dir: PathBuf,
}

impl FileTimetableLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every `*.json` file in the directory, sorted by name.
    ///
    /// A missing directory means nobody is available.
    pub fn available_people(&self) -> Result<Vec<Person>, LoadError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LoadError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut people = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            let is_timetable = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(TIMETABLE_EXT));
            if is_timetable {
                people.push(Person::from_file_name(
                    entry.file_name().to_string_lossy().into_owned(),
                ));
            }
        }
        people.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(people)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_person(&self, name: &str) -> Result<Person, LoadError> {
        self.available_people()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }

    fn path_for(&self, person: &Person) -> PathBuf {
        self.dir.join(&person.file_name)
    }
}

impl TimetableLoader for FileTimetableLoader {
    async fn load(&self, person: &Person) -> Result<WeekTimetable, LoadError> {
        let path = self.path_for(person);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
        let timetable = WeekTimetable::from_json(&content)
            .map_err(|source| LoadError::Parse { path: path.clone(), source })?;
        tracing::debug!(
            person = %person.name,
            classes = timetable.class_count(),
            "loaded timetable"
        );
        Ok(timetable)
    }
}

/// Load a person's timetable and index it, rejecting any malformed class.
///
/// Unlike [`ScheduleTracker::select`](crate::ScheduleTracker::select), which
/// drops bad entries, this fails with [`CoreError::Validation`](crate::CoreError::Validation).
pub async fn load_index<L: TimetableLoader>(loader: &L, person: &Person) -> Result<ScheduleIndex> {
    let timetable = loader.load(person).await?;
    Ok(ScheduleIndex::build(timetable)?)
}
