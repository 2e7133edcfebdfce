//! Tag Match Library
//!
//! A small, reusable library for comparing timestamped annotation tracks.
//! One track is the *reference*; every other track is an *observation*.
//! The library finds observation events that overlap reference events of
//! the same category and reports the offset between their start times.
//!
//! # Architecture
//!
//! - Loads delimited annotation exports (`HH:MM:SS:FF` timecodes) into tracks
//! - Classifies labels directly or through named label groups
//! - Matches overlapping same-category events per track pair
//!
//! The library does NOT:
//! - Render timelines
//! - Write reports
//! - Read run configuration files
//!
//! All of that lives in the application layer (tag-match-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use tag_match::{match_tracks, CategoryMapping, Classifier, LabelColor, LoaderConfig, TrackLoader, TrackRole};
//! use std::path::Path;
//!
//! let loader = TrackLoader::new(LoaderConfig::new().with_frame_rate(30));
//! let sound = loader.load(Path::new("sound_1A.csv"), TrackRole::Reference).unwrap();
//! let video = loader.load(Path::new("JRA3-001-1A.csv"), TrackRole::Observation).unwrap();
//!
//! let classifier = Classifier::new(&CategoryMapping::Direct {
//!     labels: vec![LabelColor { label: "Στήλη".into(), color: "red".parse().unwrap() }],
//! });
//!
//! let matches = match_tracks(&sound, &video, &classifier);
//! for bucket in matches.non_empty() {
//!     for m in &bucket.matches {
//!         println!("{}: {:.2}s", bucket.category.name, m.offset);
//!     }
//! }
//! ```

// Public modules
pub mod category;
pub mod config;
pub mod loader;
pub mod matcher;
pub mod timecode;
pub mod types;

// Re-export main types for convenience
pub use category::{
    Category, CategoryId, CategoryMapping, Classifier, Color, LabelColor, LabelGroup, MappingMode,
};
pub use config::{ColumnNames, LoaderConfig};
pub use loader::TrackLoader;
pub use matcher::{intersects, match_tracks, CategoryMatches, Match, MatchSet, MatchSummary};
pub use timecode::{Timecode, DEFAULT_FRAME_RATE};
pub use types::{Event, Result, TagMatchError, Track, TrackRole};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty mapping classifies nothing
        let classifier = Classifier::new(&CategoryMapping::Direct { labels: vec![] });
        assert_eq!(classifier.num_labels(), 0);
        assert_eq!(classifier.classify(Some("anything")), None);
    }
}
