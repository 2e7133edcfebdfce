//! Report generation
//!
//! Serializes the matches of every observation track against the reference
//! track, either as the fixed-layout text report or as JSON.

pub mod json;
pub mod txt;

use crate::config::ReportFormat;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tag_match::{Classifier, MatchSet, Result, TagMatchError, Track};

/// Matches of one observation track against the reference
pub struct ObservationReport<'a> {
    pub track: &'a Track,
    pub matches: MatchSet<'a>,
}

/// Role names printed in front of each matched event
#[derive(Debug, Clone)]
pub struct ReportLabels {
    pub reference: String,
    pub observation: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            reference: "Sound".to_string(),
            observation: "Video".to_string(),
        }
    }
}

/// Write a report to `path`, creating or truncating the file
///
/// The file is opened once and flushed before returning; any I/O failure
/// surfaces as `TagMatchError::Write`.
pub fn write_report_file(
    path: &Path,
    format: ReportFormat,
    reference: &Track,
    reports: &[ObservationReport<'_>],
    classifier: &Classifier,
    labels: &ReportLabels,
) -> Result<()> {
    log::info!("Writing {:?} report: {:?}", format, path);

    let write_error = |e: std::io::Error| TagMatchError::Write(format!("{:?}: {}", path, e));

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    let written = match format {
        ReportFormat::Txt => txt::write_report(&mut writer, reports, classifier.mode(), labels),
        ReportFormat::Json => json::write_report(&mut writer, reference, reports, classifier),
    };
    written.map_err(write_error)?;

    writer.flush().map_err(write_error)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use tag_match::match_tracks;

    #[test]
    fn test_write_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");

        let classifier = fixtures::classifier();
        let reference = fixtures::reference();
        let observation = fixtures::observation();
        let reports = vec![ObservationReport {
            track: &observation,
            matches: match_tracks(&reference, &observation, &classifier),
        }];

        write_report_file(
            &path,
            ReportFormat::Txt,
            &reference,
            &reports,
            &classifier,
            &ReportLabels::default(),
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Matches for video.csv:\n"));
        assert!(content.contains("Reaction Seconds: -3.00\n"));
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("results.txt");

        let classifier = fixtures::classifier();
        let reference = fixtures::reference();
        let err = write_report_file(
            &path,
            ReportFormat::Txt,
            &reference,
            &[],
            &classifier,
            &ReportLabels::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TagMatchError::Write(_)));
    }
}
