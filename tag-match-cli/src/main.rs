//! Tag Match CLI Application
//!
//! This is the command-line interface for the tag matcher.
//! It uses the tag-match library and adds:
//! - TOML run configuration (tracks, columns, category mapping)
//! - Timeline and legend rendering (SVG)
//! - Report generation (TXT/JSON)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tag_match::{match_tracks, Classifier, Track, TrackLoader, TrackRole};

mod config;
mod render;
mod report;

use config::{AppConfig, ReportFormat};
use render::TimelineStyle;
use report::{ObservationReport, ReportLabels};

/// Tag Match - Compare annotation tracks against a reference track
#[derive(Parser, Debug)]
#[command(name = "tag-match")]
#[command(about = "Match overlapping annotation tags against a reference track", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the run configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Reference track (overrides input.reference)
    #[arg(short, long, value_name = "FILE")]
    reference: Option<PathBuf>,

    /// Observation track (can be repeated; replaces input.observations)
    #[arg(long, value_name = "FILE")]
    observation: Vec<PathBuf>,

    /// Report output file (overrides output.report)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Report format (overrides output.format)
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Timeline SVG output (overrides output.timeline)
    #[arg(long, value_name = "FILE")]
    timeline: Option<PathBuf>,

    /// Legend SVG output (overrides output.legend)
    #[arg(long, value_name = "FILE")]
    legend: Option<PathBuf>,

    /// Skip timeline and legend rendering
    #[arg(long)]
    no_plot: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Tag Match CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using matcher library v{}", tag_match::VERSION);

    log::info!("Loading configuration from: {:?}", args.config);
    let mut config = config::load_config(&args.config)?;
    apply_overrides(&mut config, &args);
    config.validate().context("Invalid configuration")?;
    log::debug!("Configuration loaded successfully");

    run(&config, args.quiet)
}

/// Command line paths win over the configuration file
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(reference) = &args.reference {
        config.input.reference = Some(reference.clone());
    }
    if !args.observation.is_empty() {
        config.input.observations = args.observation.clone();
    }
    if let Some(output) = &args.output {
        config.output.report = output.clone();
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(timeline) = &args.timeline {
        config.output.timeline = timeline.clone();
    }
    if let Some(legend) = &args.legend {
        config.output.legend = legend.clone();
    }
    if args.no_plot {
        config.output.plot = false;
    }
}

/// Load every track, render, then match and write the report
fn run(config: &AppConfig, quiet: bool) -> Result<()> {
    let loader = TrackLoader::new(config.loader_config());
    let classifier = Classifier::new(&config.categories);

    let reference_path = config
        .input
        .reference
        .as_ref()
        .context("no reference track given")?;

    // All tracks load before anything is rendered or matched
    let reference = loader
        .load(reference_path, TrackRole::Reference)
        .with_context(|| format!("Failed to load reference track {:?}", reference_path))?;

    let observations = config
        .input
        .observations
        .iter()
        .map(|path| {
            loader
                .load(path, TrackRole::Observation)
                .with_context(|| format!("Failed to load observation track {:?}", path))
        })
        .collect::<Result<Vec<Track>>>()?;

    for track in std::iter::once(&reference).chain(&observations) {
        let unmatched = track
            .events
            .iter()
            .filter(|e| classifier.classify(e.label.as_deref()).is_none())
            .count();
        log::debug!("{}: {} events, {} without a category", track.name, track.len(), unmatched);
    }

    if config.output.plot {
        let tracks: Vec<&Track> = std::iter::once(&reference).chain(&observations).collect();
        let style = TimelineStyle {
            title: config.output.title.clone(),
            ..TimelineStyle::default()
        };
        render::draw_timeline(&tracks, &classifier, &style, &config.output.timeline)?;
        render::draw_legend(&classifier, &config.output.legend)?;
    }

    let reports: Vec<ObservationReport> = observations
        .iter()
        .map(|track| ObservationReport {
            track,
            matches: match_tracks(&reference, track, &classifier),
        })
        .collect();

    let labels = ReportLabels {
        reference: config.output.reference_name.clone(),
        observation: config.output.observation_name.clone(),
    };
    report::write_report_file(
        &config.output.report,
        config.output.format,
        &reference,
        &reports,
        &classifier,
        &labels,
    )?;

    if !quiet {
        for r in &reports {
            match r.matches.summary() {
                Some(s) => println!(
                    "{:<24} {:>4} matches, mean reaction {:>7.2}s",
                    r.track.name, s.count, s.mean_offset
                ),
                None => println!("{:<24} {:>4} matches", r.track.name, 0),
            }
        }
        println!("Comparison results saved to {}", config.output.report.display());
        if config.output.plot {
            println!(
                "Timeline saved to {} (legend: {})",
                config.output.timeline.display(),
                config.output.legend.display()
            );
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
