//! Track loader
//!
//! Reads one delimited annotation export into a [`Track`]. Interval bounds
//! are converted to seconds up front so the matcher and renderer only deal
//! with numbers; the raw timecode text is kept for the report.

use crate::config::LoaderConfig;
use crate::timecode;
use crate::types::{Event, Result, TagMatchError, Track, TrackRole};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    label: usize,
    start: usize,
    end: usize,
    duration: Option<usize>,
}

/// Loads annotation files into tracks
pub struct TrackLoader {
    config: LoaderConfig,
}

impl TrackLoader {
    /// Create a loader with the given configuration
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// The configuration this loader was built with
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a track from a file on disk
    ///
    /// # Errors
    /// * `Load` if the file is missing, unreadable or not valid delimited text
    /// * `MissingColumn` if a configured column is absent from the header
    /// * `TimecodeFormat` if any row carries a malformed timecode
    pub fn load(&self, path: &Path, role: TrackRole) -> Result<Track> {
        log::info!("Loading {} track: {:?}", role, path);

        let file = File::open(path)
            .map_err(|e| TagMatchError::Load(format!("Failed to open {:?}: {}", path, e)))?;

        let track = self.load_reader(file, path, role)?;

        log::info!("Loaded {} events from {:?}", track.len(), path);
        Ok(track)
    }

    /// Load a track from any reader; `path` names the source in errors and
    /// becomes the track's identity
    pub fn load_reader<R: Read>(&self, reader: R, path: &Path, role: TrackRole) -> Result<Track> {
        self.config.validate()?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.config.delimiter)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| TagMatchError::Load(format!("Failed to read header of {:?}: {}", path, e)))?
            .clone();
        let indices = self.resolve_columns(&headers, path)?;
        log::debug!("Resolved columns for {:?}: {:?}", path, indices);

        let mut events = Vec::new();
        for (idx, record) in csv_reader.records().enumerate() {
            let row = idx + 1;
            let record = record
                .map_err(|e| TagMatchError::Load(format!("Failed to read row {} of {:?}: {}", row, path, e)))?;
            events.push(self.parse_row(&record, row, indices, path)?);
        }

        Ok(Track::new(path, role, events))
    }

    fn resolve_columns(&self, headers: &csv::StringRecord, path: &Path) -> Result<ColumnIndices> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| TagMatchError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };

        let columns = &self.config.columns;
        let duration = match columns.duration.as_deref() {
            Some(name) if !name.is_empty() => Some(find(name)?),
            _ => None,
        };

        Ok(ColumnIndices {
            label: find(&columns.label)?,
            start: find(&columns.start)?,
            end: find(&columns.end)?,
            duration,
        })
    }

    fn parse_row(
        &self,
        record: &csv::StringRecord,
        row: usize,
        indices: ColumnIndices,
        path: &Path,
    ) -> Result<Event> {
        let columns = &self.config.columns;
        let start = self.convert(record.get(indices.start), row, &columns.start, path)?;
        let end = self.convert(record.get(indices.end), row, &columns.end, path)?;
        let duration = match (indices.duration, columns.duration.as_deref()) {
            (Some(i), Some(name)) => self.convert(record.get(i), row, name, path)?,
            _ => end - start,
        };

        let label = record
            .get(indices.label)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        log::trace!("{:?} row {}: {:?} [{:.3}, {:.3}]", path, row, label, start, end);

        Ok(Event {
            row,
            label,
            start,
            end,
            duration,
            start_timecode: record.get(indices.start).unwrap_or("").trim().to_string(),
            end_timecode: record.get(indices.end).unwrap_or("").trim().to_string(),
        })
    }

    fn convert(&self, cell: Option<&str>, row: usize, column: &str, path: &Path) -> Result<f64> {
        timecode::to_seconds(cell, self.config.frame_rate).map_err(|e| match e {
            TagMatchError::TimecodeFormat(msg) => TagMatchError::TimecodeFormat(format!(
                "{:?} row {} column '{}': {}",
                path, row, column, msg
            )),
            other => other,
        })
    }
}

impl Default for TrackLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}
