//! Core error types for timetable-core.
//!
//! This module defines the error hierarchy using thiserror. The live state
//! engine itself never fails; fallibility is confined to building the
//! schedule index, loading timetables and reading configuration.

use std::path::PathBuf;
use thiserror::Error;

use chrono::{NaiveTime, Weekday};

/// Core error type for timetable-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Timetable loading errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Validation errors raised while indexing a timetable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A class whose start is not strictly before its end.
    #[error("Invalid time range for slot '{slot}' on {day}: end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        day: Weekday,
        slot: String,
        start: NaiveTime,
        end: NaiveTime,
    },

    /// A wall-clock time that could not be parsed.
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime { value: String },

    /// A day key that is not one of the seven weekdays.
    #[error("Unknown day '{0}'")]
    UnknownDay(String),
}

/// Errors from the timetable repository.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The timetable file could not be read.
    #[error("Failed to read timetable at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The timetable file is not a valid timetable document.
    #[error("Failed to parse timetable at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No timetable exists for the requested person.
    #[error("No timetable found for '{0}'")]
    NotFound(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// The data directory could not be determined or created.
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
