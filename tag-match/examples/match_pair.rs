//! Standalone matcher for one reference/observation pair
//!
//! Every distinct label in the reference track becomes its own category,
//! so no mapping file is needed.
//!
//! Usage:
//!   match_pair <reference.csv> <observation.csv> [--fps <rate>]
//!
//! Example:
//!   match_pair sound_1A.csv JRA3-001-1A.csv --fps 30

use std::env;
use std::path::PathBuf;
use tag_match::{
    match_tracks, CategoryMapping, Classifier, Color, LabelColor, LoaderConfig, TrackLoader,
    TrackRole,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <reference.csv> <observation.csv> [--fps <rate>]", args[0]);
        std::process::exit(1);
    }

    let reference_path = PathBuf::from(&args[1]);
    let observation_path = PathBuf::from(&args[2]);
    let mut fps = tag_match::DEFAULT_FRAME_RATE;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--fps" if i + 1 < args.len() => {
                fps = match args[i + 1].parse() {
                    Ok(rate) if rate > 0 => rate,
                    _ => {
                        eprintln!("Invalid frame rate: {}", args[i + 1]);
                        std::process::exit(1);
                    }
                };
                i += 2;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    let loader = TrackLoader::new(LoaderConfig::new().with_frame_rate(fps));
    let reference = match loader.load(&reference_path, TrackRole::Reference) {
        Ok(track) => track,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let observation = match loader.load(&observation_path, TrackRole::Observation) {
        Ok(track) => track,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut labels: Vec<LabelColor> = Vec::new();
    for event in &reference.events {
        if let Some(label) = &event.label {
            if !labels.iter().any(|l| &l.label == label) {
                labels.push(LabelColor {
                    label: label.clone(),
                    color: Color::UNMATCHED,
                });
            }
        }
    }
    let classifier = Classifier::new(&CategoryMapping::Direct { labels });

    let matches = match_tracks(&reference, &observation, &classifier);
    println!(
        "{} vs {}: {} matches",
        reference.name,
        observation.name,
        matches.total()
    );

    for bucket in matches.non_empty() {
        println!("\n{}", bucket.category.name);
        for m in &bucket.matches {
            println!(
                "  row {:>4} / row {:>4}  {:>8.2}s",
                m.reference.row, m.observation.row, m.offset
            );
        }
    }
}
