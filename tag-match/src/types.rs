//! Core types for the tag matcher library
//!
//! This module defines the in-memory representation of annotation tracks.
//! Tracks are loaded once, never mutated afterwards, and borrowed by the
//! matcher for the lifetime of a report.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Result type for library operations
pub type Result<T> = std::result::Result<T, TagMatchError>;

/// Errors that can occur while loading, classifying or reporting
#[derive(Debug, thiserror::Error)]
pub enum TagMatchError {
    #[error("Invalid timecode: {0}")]
    TimecodeFormat(String),

    #[error("Failed to load track: {0}")]
    Load(String),

    #[error("Missing column '{column}' in {path:?}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Failed to write report: {0}")]
    Write(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Role of a track within a comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackRole {
    /// The single track every other track is compared against
    Reference,
    /// Any non-reference track
    Observation,
}

impl fmt::Display for TrackRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackRole::Reference => write!(f, "reference"),
            TrackRole::Observation => write!(f, "observation"),
        }
    }
}

/// One annotated interval from a track file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// 1-based data row in the source file (header excluded)
    pub row: usize,
    /// Annotation label, `None` when the cell was empty
    pub label: Option<String>,
    /// Interval start in seconds
    pub start: f64,
    /// Interval end in seconds (may be before `start`)
    pub end: f64,
    /// Duration column in seconds, or `end - start` when the column is absent
    pub duration: f64,
    /// Start timecode exactly as it appeared in the file
    pub start_timecode: String,
    /// End timecode exactly as it appeared in the file
    pub end_timecode: String,
}

impl Event {
    /// Signed length of the interval, used for rendering
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Label text, empty when missing
    pub fn label_text(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

/// An ordered sequence of events loaded from one file
#[derive(Debug, Clone, Serialize)]
pub struct Track {
    /// Display name (file stem)
    pub name: String,
    /// Source file path
    pub path: PathBuf,
    /// Reference or observation
    pub role: TrackRole,
    /// Events in file row order
    pub events: Vec<Event>,
}

impl Track {
    /// Create a track, deriving the display name from the file stem
    pub fn new(path: &Path, role: TrackRole, events: Vec<Event>) -> Self {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        Self {
            name,
            path: path.to_path_buf(),
            role,
            events,
        }
    }

    /// File name including extension, as shown in report headings
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.name.clone())
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the track holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Latest end time across all events (0 for an empty track)
    pub fn max_time(&self) -> f64 {
        self.events
            .iter()
            .map(|e| e.end.max(e.start))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
pub(crate) fn event(label: Option<&str>, start: f64, end: f64) -> Event {
    Event {
        row: 0,
        label: label.map(str::to_string),
        start,
        end,
        duration: end - start,
        start_timecode: String::new(),
        end_timecode: String::new(),
    }
}
