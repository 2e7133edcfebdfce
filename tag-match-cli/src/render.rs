//! Timeline rendering
//!
//! Draws every track as a horizontal row of interval bars colored by
//! category, plus a separate legend figure. Both figures are written as SVG.

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::path::Path;
use tag_match::{Classifier, Color as TagColor, Track};

const BAR_HEIGHT: f64 = 0.2;
const BAR_ALPHA: f64 = 0.5;

/// Figure settings for the timeline
#[derive(Debug, Clone)]
pub struct TimelineStyle {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            title: "Video Clips Comparison Timeline".to_string(),
            width: 1400,
            height: 800,
        }
    }
}

fn rgb(color: TagColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// Label for a y-axis key point: the track name on whole rows, blank elsewhere
fn row_label(names: &[String], y: f64) -> String {
    let row = y.round();
    if (y - row).abs() > 1e-6 || row < 1.0 {
        return String::new();
    }
    names.get(row as usize - 1).cloned().unwrap_or_default()
}

/// Draw the timeline figure
///
/// `tracks[0]` is drawn on row 1 (the reference), the rest on rows
/// 2..=N. Reversed intervals are drawn as zero-width bars at their start.
pub fn draw_timeline(
    tracks: &[&Track],
    classifier: &Classifier,
    style: &TimelineStyle,
    path: &Path,
) -> Result<()> {
    log::info!("Rendering timeline of {} tracks: {:?}", tracks.len(), path);

    let names: Vec<String> = tracks.iter().map(|t| t.name.clone()).collect();
    let rows = tracks.len().max(1) as f64;

    let mut x_max = tracks.iter().map(|t| t.max_time()).fold(0.0, f64::max);
    if !x_max.is_finite() || x_max <= 0.0 {
        x_max = 1.0;
    }

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&style.title, ("sans-serif", 24).into_font())
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 160)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0.0..(x_max * 1.02), 0.8..(rows + 0.2))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(tracks.len() + 1)
        .y_label_formatter(&|y| row_label(&names, *y))
        .x_label_formatter(&|x| format!("{:.0}", x))
        .x_desc("Time (seconds)")
        .light_line_style(WHITE)
        .bold_line_style(RGBColor(200, 200, 200).stroke_width(1))
        .label_style(FontDesc::new(FontFamily::SansSerif, 12.0, FontStyle::Normal))
        .draw()?;

    for (idx, track) in tracks.iter().enumerate() {
        let y = (idx + 1) as f64;
        chart.draw_series(track.events.iter().map(|event| {
            let color = rgb(classifier.color_of(event.label.as_deref()));
            let x1 = event.start + event.span().max(0.0);
            Rectangle::new(
                [
                    (event.start, y - BAR_HEIGHT / 2.0),
                    (x1, y + BAR_HEIGHT / 2.0),
                ],
                color.mix(BAR_ALPHA).filled(),
            )
        }))?;
    }

    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Draw the legend figure: one colored swatch per category
pub fn draw_legend(classifier: &Classifier, path: &Path) -> Result<()> {
    let categories = classifier.categories();
    log::info!("Rendering legend with {} entries: {:?}", categories.len(), path);

    let height = 80 + 28 * categories.len() as u32;
    let root = SVGBackend::new(path, (480, height)).into_drawing_area();
    root.fill(&WHITE)?;

    root.draw(&Text::new(
        "Tag Colors",
        (20, 20),
        FontDesc::new(FontFamily::SansSerif, 18.0, FontStyle::Bold).color(&BLACK),
    ))?;

    for (idx, category) in categories.iter().enumerate() {
        let y = 60 + 28 * idx as i32;
        root.draw(&PathElement::new(
            vec![(20, y), (60, y)],
            rgb(category.color).stroke_width(4),
        ))?;
        root.draw(&Text::new(
            category.name.clone(),
            (72, y - 8),
            FontDesc::new(FontFamily::SansSerif, 16.0, FontStyle::Normal).color(&BLACK),
        ))?;
    }

    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tag_match::{CategoryMapping, Event, LabelColor, TrackRole};

    fn classifier() -> Classifier {
        Classifier::new(&CategoryMapping::Direct {
            labels: vec![LabelColor { label: "Στήλη".into(), color: "red".parse().unwrap() }],
        })
    }

    fn track(name: &str, events: Vec<(Option<&str>, f64, f64)>) -> Track {
        let events = events
            .into_iter()
            .enumerate()
            .map(|(i, (label, start, end))| Event {
                row: i + 1,
                label: label.map(str::to_string),
                start,
                end,
                duration: end - start,
                start_timecode: String::new(),
                end_timecode: String::new(),
            })
            .collect();
        Track::new(Path::new(name), TrackRole::Observation, events)
    }

    #[test]
    fn test_row_labels() {
        let names = vec!["sound_1A".to_string(), "JRA3-001-1A".to_string()];
        assert_eq!(row_label(&names, 1.0), "sound_1A");
        assert_eq!(row_label(&names, 2.0), "JRA3-001-1A");
        assert_eq!(row_label(&names, 1.5), "");
        assert_eq!(row_label(&names, 3.0), "");
        assert_eq!(row_label(&names, 0.8), "");
    }

    #[test]
    fn test_draw_figures() {
        let dir = tempfile::tempdir().unwrap();
        let timeline = dir.path().join("timeline.svg");
        let legend = dir.path().join("legend.svg");

        let reference = track("sound_1A.csv", vec![(Some("Στήλη"), 1.0, 4.0), (None, 6.0, 5.0)]);
        let observation = track("JRA3-001-1A.csv", vec![(Some("other"), 2.0, 3.0)]);
        let classifier = classifier();

        draw_timeline(&[&reference, &observation], &classifier, &TimelineStyle::default(), &timeline).unwrap();
        draw_legend(&classifier, &legend).unwrap();

        let svg = std::fs::read_to_string(&timeline).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("sound_1A"));
        assert!(svg.contains("JRA3-001-1A"));

        let svg = std::fs::read_to_string(&legend).unwrap();
        assert!(svg.contains("Tag Colors"));
    }
}
