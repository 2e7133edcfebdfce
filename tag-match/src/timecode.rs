//! Broadcast timecode handling
//!
//! Annotation exports carry interval bounds as `HH:MM:SS:FF` strings. The
//! frame field is divided by the run's fixed frame rate; it is not checked
//! against that rate.

use crate::types::{Result, TagMatchError};
use std::fmt;
use std::str::FromStr;

/// Default frame rate of the annotation exports
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// A parsed `hours:minutes:seconds:frames` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timecode {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub frames: u64,
}

impl Timecode {
    pub fn new(hours: u64, minutes: u64, seconds: u64, frames: u64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            frames,
        }
    }

    /// Offset in seconds at the given frame rate
    pub fn to_seconds(&self, frame_rate: u32) -> f64 {
        self.hours as f64 * 3600.0
            + self.minutes as f64 * 60.0
            + self.seconds as f64
            + self.frames as f64 / frame_rate as f64
    }
}

impl FromStr for Timecode {
    type Err = TagMatchError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() != 4 {
            return Err(TagMatchError::TimecodeFormat(format!(
                "expected 4 fields in {:?}, found {}",
                s,
                fields.len()
            )));
        }

        let mut values = [0u64; 4];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field.trim().parse().map_err(|_| {
                TagMatchError::TimecodeFormat(format!("non-integer field {:?} in {:?}", field, s))
            })?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

/// Convert an optional timecode cell to seconds
///
/// A missing or blank cell converts to `0.0`.
pub fn to_seconds(cell: Option<&str>, frame_rate: u32) -> Result<f64> {
    match cell.map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(text) => Ok(text.parse::<Timecode>()?.to_seconds(frame_rate)),
    }
}
