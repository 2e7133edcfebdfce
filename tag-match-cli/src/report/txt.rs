//! Plain text report
//!
//! One section per observation track, one subsection per category with at
//! least one match. Offsets are printed with two decimals.

use super::{ObservationReport, ReportLabels};
use std::io::{self, Write};
use tag_match::{Event, MappingMode};

const MATCH_SEPARATOR_WIDTH: usize = 40;
const TRACK_SEPARATOR_WIDTH: usize = 80;

/// Write the text report for every observation track
pub fn write_report<W: Write>(
    out: &mut W,
    reports: &[ObservationReport<'_>],
    mode: MappingMode,
    labels: &ReportLabels,
) -> io::Result<()> {
    for report in reports {
        writeln!(out, "Matches for {}:", report.track.file_name())?;

        for bucket in report.matches.non_empty() {
            writeln!(out)?;
            writeln!(out, "{}: {}", mode.heading(), bucket.category.name)?;

            for m in &bucket.matches {
                write_event(out, &labels.reference, m.reference)?;
                write_event(out, &labels.observation, m.observation)?;
                writeln!(out, "Reaction Seconds: {:.2}", m.offset)?;
                writeln!(out, "{}", "-".repeat(MATCH_SEPARATOR_WIDTH))?;
            }
        }

        writeln!(out, "{}", "=".repeat(TRACK_SEPARATOR_WIDTH))?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_event<W: Write>(out: &mut W, role: &str, event: &Event) -> io::Result<()> {
    writeln!(
        out,
        "{} Tag: {}, Time: {} - {}",
        role,
        event.label_text(),
        event.start_timecode,
        event.end_timecode
    )
}
