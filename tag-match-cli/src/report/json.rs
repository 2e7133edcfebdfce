//! JSON report

use super::ObservationReport;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tag_match::{CategoryMatches, Classifier, MappingMode, MatchSummary, Track};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    tool_version: &'static str,
    mode: MappingMode,
    reference: TrackInfo<'a>,
    observations: Vec<ObservationEntry<'a>>,
}

#[derive(Serialize)]
struct TrackInfo<'a> {
    name: &'a str,
    path: &'a Path,
    events: usize,
}

#[derive(Serialize)]
struct ObservationEntry<'a> {
    track: TrackInfo<'a>,
    total_matches: usize,
    summary: Option<MatchSummary>,
    categories: Vec<CategoryEntry<'a>>,
}

#[derive(Serialize)]
struct CategoryEntry<'a> {
    #[serde(flatten)]
    matches: &'a CategoryMatches<'a>,
    summary: Option<MatchSummary>,
}

impl<'a> TrackInfo<'a> {
    fn new(track: &'a Track) -> Self {
        Self {
            name: &track.name,
            path: &track.path,
            events: track.len(),
        }
    }
}

/// Write the JSON report (pretty-printed)
pub fn write_report<W: Write>(
    out: &mut W,
    reference: &Track,
    reports: &[ObservationReport<'_>],
    classifier: &Classifier,
) -> io::Result<()> {
    let report = JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        tool_version: env!("CARGO_PKG_VERSION"),
        mode: classifier.mode(),
        reference: TrackInfo::new(reference),
        observations: reports
            .iter()
            .map(|r| ObservationEntry {
                track: TrackInfo::new(r.track),
                total_matches: r.matches.total(),
                summary: r.matches.summary(),
                categories: r
                    .matches
                    .non_empty()
                    .map(|c| CategoryEntry {
                        matches: c,
                        summary: c.summary(),
                    })
                    .collect(),
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
