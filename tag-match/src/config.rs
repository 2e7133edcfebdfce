//! Track loader configuration
//!
//! The loader only needs the frame rate and the names of the columns it
//! reads. Category mappings and output settings belong to the application.

use crate::timecode::DEFAULT_FRAME_RATE;
use crate::types::{Result, TagMatchError};
use serde::{Deserialize, Serialize};

/// Column names read from each annotation file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    /// Free-text annotation label
    #[serde(default = "default_label_column")]
    pub label: String,

    /// Interval start timecode
    #[serde(default = "default_start_column")]
    pub start: String,

    /// Interval end timecode
    #[serde(default = "default_end_column")]
    pub end: String,

    /// Duration timecode; `None` when the export has no such column
    #[serde(default = "default_duration_column")]
    pub duration: Option<String>,
}

fn default_label_column() -> String {
    "Notes".to_string()
}

fn default_start_column() -> String {
    "Source In".to_string()
}

fn default_end_column() -> String {
    "Source Out".to_string()
}

fn default_duration_column() -> Option<String> {
    Some("Record Duration".to_string())
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            label: default_label_column(),
            start: default_start_column(),
            end: default_end_column(),
            duration: default_duration_column(),
        }
    }
}

/// Configuration for the track loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Frames per second used to convert the frame field
    pub frame_rate: u32,
    /// Field delimiter (ASCII)
    pub delimiter: u8,
    /// Columns to read
    pub columns: ColumnNames,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            delimiter: b',',
            columns: ColumnNames::default(),
        }
    }
}

impl LoaderConfig {
    /// Create a loader configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the frame rate
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Builder method: set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder method: set the column names
    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }

    /// Reject settings the loader cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            return Err(TagMatchError::Config("frame rate must be positive".to_string()));
        }
        if !self.delimiter.is_ascii() {
            return Err(TagMatchError::Config(format!(
                "delimiter 0x{:02X} is not ASCII",
                self.delimiter
            )));
        }
        if self.columns.label.is_empty() || self.columns.start.is_empty() || self.columns.end.is_empty() {
            return Err(TagMatchError::Config("column names must not be empty".to_string()));
        }
        Ok(())
    }
}
