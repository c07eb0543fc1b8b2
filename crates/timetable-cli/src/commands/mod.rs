pub mod config;
pub mod now;
pub mod people;
pub mod watch;
pub mod week;

use std::path::PathBuf;

use timetable_core::{Config, FileTimetableLoader, LoadError, Person};

/// Shared state for every command: loaded config and the timetable loader.
pub struct Context {
    pub config: Config,
    pub loader: FileTimetableLoader,
}

impl Context {
    pub fn new(dir_override: Option<PathBuf>) -> timetable_core::Result<Self> {
        let config = Config::load_or_default();
        let dir = match dir_override {
            Some(dir) => dir,
            None => config.timetables_dir()?,
        };
        tracing::debug!(dir = %dir.display(), "using timetables directory");
        Ok(Self {
            config,
            loader: FileTimetableLoader::new(dir),
        })
    }

    /// Explicit name, else the selected person, else the first available one.
    ///
    /// A saved selection whose file has gone away falls back to the first
    /// available person; an explicit name never does.
    pub fn resolve_person(&self, explicit: Option<&str>) -> Result<Person, LoadError> {
        if let Some(name) = explicit {
            return self.loader.find_person(name);
        }
        if let Some(saved) = self.config.selected_person.as_deref() {
            match self.loader.find_person(saved) {
                Ok(person) => return Ok(person),
                Err(LoadError::NotFound(_)) => {
                    tracing::warn!(person = saved, "selected timetable is gone; using the first available");
                }
                Err(e) => return Err(e),
            }
        }
        self.loader
            .available_people()?
            .into_iter()
            .next()
            .ok_or_else(|| LoadError::NotFound(self.loader.dir().display().to_string()))
    }
}
