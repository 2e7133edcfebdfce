//! Overlap matcher
//!
//! Pairs reference events with observation events of the same category
//! whose intervals intersect, and records how far apart their starts are.
//! Every pair is tested; tracks hold at most a few hundred events.

use crate::category::{Category, CategoryId, Classifier};
use crate::types::{Event, Track};
use serde::Serialize;

/// True if the closed intervals `[a_start, a_end]` and `[b_start, b_end]`
/// share at least one point
pub fn intersects(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> bool {
    a_end >= b_start && b_end >= a_start
}

/// A same-category, overlapping pair of events
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Match<'a> {
    pub reference: &'a Event,
    pub observation: &'a Event,
    /// `reference.start - observation.start`; positive when the reference
    /// event started later
    pub offset: f64,
}

/// Matches of one category, in reference-row then observation-row order
#[derive(Debug, Clone, Serialize)]
pub struct CategoryMatches<'a> {
    pub category: &'a Category,
    pub matches: Vec<Match<'a>>,
}

impl<'a> CategoryMatches<'a> {
    /// Offset statistics, `None` when the bucket is empty
    pub fn summary(&self) -> Option<MatchSummary> {
        MatchSummary::from_offsets(self.matches.iter().map(|m| m.offset))
    }
}

/// Offset statistics for a set of matches
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchSummary {
    pub count: usize,
    pub mean_offset: f64,
    pub min_offset: f64,
    pub max_offset: f64,
}

impl MatchSummary {
    fn from_offsets(offsets: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for offset in offsets {
            count += 1;
            sum += offset;
            min = min.min(offset);
            max = max.max(offset);
        }

        (count > 0).then(|| Self {
            count,
            mean_offset: sum / count as f64,
            min_offset: min,
            max_offset: max,
        })
    }
}

/// All matches between one reference and one observation track, bucketed
/// by category in declaration order
#[derive(Debug, Clone, Serialize)]
pub struct MatchSet<'a> {
    pub categories: Vec<CategoryMatches<'a>>,
}

impl<'a> MatchSet<'a> {
    /// Total number of matches across categories
    pub fn total(&self) -> usize {
        self.categories.iter().map(|c| c.matches.len()).sum()
    }

    /// Categories with at least one match
    pub fn non_empty(&self) -> impl Iterator<Item = &CategoryMatches<'a>> {
        self.categories.iter().filter(|c| !c.matches.is_empty())
    }

    /// Matches of a category by name
    pub fn get(&self, name: &str) -> Option<&[Match<'a>]> {
        self.categories
            .iter()
            .find(|c| c.category.name == name)
            .map(|c| c.matches.as_slice())
    }

    /// Offset statistics over every match in the set
    pub fn summary(&self) -> Option<MatchSummary> {
        MatchSummary::from_offsets(
            self.categories
                .iter()
                .flat_map(|c| c.matches.iter())
                .map(|m| m.offset),
        )
    }
}

/// Find every same-category overlap between `reference` and `observation`
pub fn match_tracks<'a>(
    reference: &'a Track,
    observation: &'a Track,
    classifier: &'a Classifier,
) -> MatchSet<'a> {
    let mut buckets: Vec<Vec<Match<'a>>> = vec![Vec::new(); classifier.categories().len()];

    let observation_ids: Vec<Option<CategoryId>> = observation
        .events
        .iter()
        .map(|e| classifier.classify(e.label.as_deref()))
        .collect();

    let unmatched = observation_ids.iter().filter(|id| id.is_none()).count();
    if unmatched > 0 {
        log::debug!(
            "{}: {} of {} events have no category",
            observation.name,
            unmatched,
            observation.len()
        );
    }

    for ref_event in &reference.events {
        let Some(ref_id) = classifier.classify(ref_event.label.as_deref()) else {
            continue;
        };

        for (obs_event, obs_id) in observation.events.iter().zip(&observation_ids) {
            if *obs_id != Some(ref_id) {
                continue;
            }
            if !intersects(ref_event.start, ref_event.end, obs_event.start, obs_event.end) {
                continue;
            }

            log::trace!(
                "Match {:?}: reference row {} / {} row {}",
                classifier.category(ref_id).name,
                ref_event.row,
                observation.name,
                obs_event.row
            );
            buckets[ref_id].push(Match {
                reference: ref_event,
                observation: obs_event,
                offset: ref_event.start - obs_event.start,
            });
        }
    }

    let set = MatchSet {
        categories: classifier
            .categories()
            .iter()
            .zip(buckets)
            .map(|(category, matches)| CategoryMatches { category, matches })
            .collect(),
    };

    log::info!(
        "{} vs {}: {} matches",
        reference.name,
        observation.name,
        set.total()
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{CategoryMapping, LabelColor};
    use crate::types::{event, TrackRole};
    use std::path::Path;

    fn direct(labels: &[(&str, &str)]) -> Classifier {
        Classifier::new(&CategoryMapping::Direct {
            labels: labels
                .iter()
                .map(|(label, color)| LabelColor {
                    label: label.to_string(),
                    color: color.parse().unwrap(),
                })
                .collect(),
        })
    }

    fn track(name: &str, role: TrackRole, events: Vec<Event>) -> Track {
        Track::new(Path::new(name), role, events)
    }

    #[test]
    fn test_intersection_boundary() {
        assert!(intersects(0.0, 10.0, 10.0, 20.0));
        assert!(!intersects(0.0, 10.0, 10.0001, 20.0));
        assert!(intersects(5.0, 5.0, 0.0, 10.0));
        assert!(intersects(3.0, 3.0, 3.0, 3.0));
    }

    #[test]
    fn test_intersection_symmetry() {
        let intervals = [
            (0.0, 10.0),
            (10.0, 20.0),
            (10.0001, 20.0),
            (-5.0, 0.0),
            (4.0, 4.0),
            (8.0, 2.0),
            (2.0, 30.0),
        ];
        for &(a0, a1) in &intervals {
            for &(b0, b1) in &intervals {
                assert_eq!(intersects(a0, a1, b0, b1), intersects(b0, b1, a0, a1));
            }
        }
    }

    #[test]
    fn test_offset_sign() {
        let classifier = direct(&[("A", "red")]);
        let reference = track("ref.csv", TrackRole::Reference, vec![event(Some("A"), 5.0, 8.0)]);
        let observation = track("obs.csv", TrackRole::Observation, vec![event(Some("A"), 2.0, 6.0)]);

        let set = match_tracks(&reference, &observation, &classifier);
        let matches = set.get("A").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].offset, 3.0);
    }

    #[test]
    fn test_no_cross_category_matches() {
        let classifier = direct(&[("A", "red"), ("B", "blue")]);
        let reference = track("ref.csv", TrackRole::Reference, vec![event(Some("A"), 0.0, 10.0)]);
        let observation = track(
            "obs.csv",
            TrackRole::Observation,
            vec![event(Some("B"), 2.0, 6.0), event(Some("C"), 2.0, 6.0), event(None, 2.0, 6.0)],
        );

        let set = match_tracks(&reference, &observation, &classifier);
        assert_eq!(set.total(), 0);
        assert_eq!(set.non_empty().count(), 0);
        assert!(set.summary().is_none());
    }

    #[test]
    fn test_unmatched_reference_label_is_skipped() {
        let classifier = direct(&[("A", "red")]);
        let reference = track("ref.csv", TrackRole::Reference, vec![event(Some("Z"), 0.0, 10.0)]);
        let observation = track("obs.csv", TrackRole::Observation, vec![event(Some("Z"), 0.0, 10.0)]);

        assert_eq!(match_tracks(&reference, &observation, &classifier).total(), 0);
    }

    #[test]
    fn test_one_to_many_order() {
        let classifier = direct(&[("B", "blue"), ("A", "red")]);
        let reference = track(
            "ref.csv",
            TrackRole::Reference,
            vec![event(Some("A"), 0.0, 10.0), event(Some("A"), 8.0, 12.0), event(Some("B"), 0.0, 1.0)],
        );
        let observation = track(
            "obs.csv",
            TrackRole::Observation,
            vec![event(Some("A"), 9.0, 9.5), event(Some("A"), 1.0, 2.0), event(Some("B"), 1.0, 3.0)],
        );

        let set = match_tracks(&reference, &observation, &classifier);
        assert_eq!(set.total(), 4);

        // Buckets follow declaration order, not first appearance
        let names: Vec<&str> = set.categories.iter().map(|c| c.category.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);

        let offsets: Vec<f64> = set.get("A").unwrap().iter().map(|m| m.offset).collect();
        assert_eq!(offsets, vec![-9.0, -1.0, -1.0]);

        let summary = set.categories[1].summary().unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min_offset, -9.0);
        assert_eq!(summary.max_offset, -1.0);
        assert!((summary.mean_offset - (-11.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_interval_tolerated() {
        let classifier = direct(&[("A", "red")]);
        let reference = track("ref.csv", TrackRole::Reference, vec![event(Some("A"), 10.0, 4.0)]);
        let observation = track(
            "obs.csv",
            TrackRole::Observation,
            vec![event(Some("A"), 5.0, 6.0), event(Some("A"), 12.0, 13.0)],
        );

        // [10, 4] only "meets" intervals that satisfy both bound checks
        let set = match_tracks(&reference, &observation, &classifier);
        assert_eq!(set.total(), 0);

        let observation = track("obs.csv", TrackRole::Observation, vec![event(Some("A"), 3.0, 11.0)]);
        let set = match_tracks(&reference, &observation, &classifier);
        assert_eq!(set.total(), 1);
        assert_eq!(set.get("A").unwrap()[0].offset, 7.0);
    }
}
