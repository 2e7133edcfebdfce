//! Label categories and colors
//!
//! A mapping either treats every listed label as its own category (direct
//! mode) or folds several labels into a named group (grouped mode). The
//! [`Classifier`] turns a mapping into a label index once; lookups after
//! that are a single hash probe.

use crate::types::{Result, TagMatchError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An sRGB color parsed from a name or `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Color used for labels that belong to no category
    pub const UNMATCHED: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn named(name: &str) -> Option<Self> {
        let rgb = match name {
            "red" => (255, 0, 0),
            "green" => (0, 128, 0),
            "blue" => (0, 0, 255),
            "purple" => (128, 0, 128),
            "yellow" => (255, 255, 0),
            "black" => (0, 0, 0),
            "white" => (255, 255, 255),
            "brown" => (165, 42, 42),
            "gray" | "grey" => (128, 128, 128),
            "orange" => (255, 165, 0),
            "pink" => (255, 192, 203),
            "cyan" => (0, 255, 255),
            "magenta" => (255, 0, 255),
            "olive" => (128, 128, 0),
            "navy" => (0, 0, 128),
            "teal" => (0, 128, 128),
            "lime" => (0, 255, 0),
            "maroon" => (128, 0, 0),
            "gold" => (255, 215, 0),
            "silver" => (192, 192, 192),
            _ => return None,
        };
        Some(Self::rgb(rgb.0, rgb.1, rgb.2))
    }
}

impl FromStr for Color {
    type Err = TagMatchError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            let channel = |i: usize| {
                hex.get(i..i + 2)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
            };
            return match (hex.len(), channel(0), channel(2), channel(4)) {
                (6, Some(r), Some(g), Some(b)) => Ok(Self::rgb(r, g, b)),
                _ => Err(TagMatchError::InvalidColor(s.to_string())),
            };
        }

        Self::named(&s.to_lowercase()).ok_or_else(|| TagMatchError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A single label with its own color (direct mode)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelColor {
    pub label: String,
    pub color: Color,
}

/// A named group of labels sharing one color (grouped mode)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelGroup {
    pub name: String,
    pub color: Color,
    pub labels: Vec<String>,
}

/// Category mapping as supplied by the run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CategoryMapping {
    /// Every listed label is its own category
    Direct { labels: Vec<LabelColor> },
    /// Labels are folded into named groups
    Grouped { groups: Vec<LabelGroup> },
}

/// Which kind of mapping a classifier was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingMode {
    Direct,
    Grouped,
}

impl MappingMode {
    /// Heading used for a category section in reports
    pub fn heading(&self) -> &'static str {
        match self {
            MappingMode::Direct => "Tag",
            MappingMode::Grouped => "Team",
        }
    }
}

/// Position of a category in declaration order
pub type CategoryId = usize;

/// Matching and coloring identity of a label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// Label itself (direct) or group name (grouped)
    pub name: String,
    pub color: Color,
}

/// Immutable label → category index
#[derive(Debug, Clone)]
pub struct Classifier {
    mode: MappingMode,
    categories: Vec<Category>,
    lookup: HashMap<String, CategoryId>,
}

impl Classifier {
    /// Build the label index for a mapping
    ///
    /// In grouped mode a label listed under several groups resolves to the
    /// last of them.
    pub fn new(mapping: &CategoryMapping) -> Self {
        let mut categories: Vec<Category> = Vec::new();
        let mut lookup: HashMap<String, CategoryId> = HashMap::new();

        let mode = match mapping {
            CategoryMapping::Direct { labels } => {
                for entry in labels {
                    match lookup.get(&entry.label).copied() {
                        Some(id) => categories[id].color = entry.color,
                        None => {
                            lookup.insert(entry.label.clone(), categories.len());
                            categories.push(Category {
                                name: entry.label.clone(),
                                color: entry.color,
                            });
                        }
                    }
                }
                MappingMode::Direct
            }
            CategoryMapping::Grouped { groups } => {
                for group in groups {
                    let id = match categories.iter().position(|c| c.name == group.name) {
                        Some(id) => {
                            categories[id].color = group.color;
                            id
                        }
                        None => {
                            categories.push(Category {
                                name: group.name.clone(),
                                color: group.color,
                            });
                            categories.len() - 1
                        }
                    };

                    for label in &group.labels {
                        if let Some(previous) = lookup.insert(label.clone(), id) {
                            if previous != id {
                                log::debug!(
                                    "Label {:?} listed in groups {:?} and {:?}; using {:?}",
                                    label,
                                    categories[previous].name,
                                    group.name,
                                    group.name
                                );
                            }
                        }
                    }
                }
                MappingMode::Grouped
            }
        };

        log::debug!(
            "Classifier built: {} categories, {} labels ({:?} mode)",
            categories.len(),
            lookup.len(),
            mode
        );

        Self {
            mode,
            categories,
            lookup,
        }
    }

    /// Category of a label, `None` if unmatched
    ///
    /// A missing label is always unmatched.
    pub fn classify(&self, label: Option<&str>) -> Option<CategoryId> {
        label.and_then(|l| self.lookup.get(l).copied())
    }

    /// Category details for an id returned by [`Classifier::classify`]
    pub fn category(&self, id: CategoryId) -> &Category {
        &self.categories[id]
    }

    /// Render color for a label (gray when unmatched)
    pub fn color_of(&self, label: Option<&str>) -> Color {
        self.classify(label)
            .map(|id| self.categories[id].color)
            .unwrap_or(Color::UNMATCHED)
    }

    /// All categories in declaration order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn mode(&self) -> MappingMode {
        self.mode
    }

    /// Number of distinct labels in the index
    pub fn num_labels(&self) -> usize {
        self.lookup.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct() -> CategoryMapping {
        CategoryMapping::Direct {
            labels: vec![
                LabelColor { label: "Στήλη".into(), color: "red".parse().unwrap() },
                LabelColor { label: "Αέτωμα".into(), color: "green".parse().unwrap() },
            ],
        }
    }

    fn grouped() -> CategoryMapping {
        CategoryMapping::Grouped {
            groups: vec![
                LabelGroup {
                    name: "Κένταυροι".into(),
                    color: "red".parse().unwrap(),
                    labels: vec!["Κένταυροι".into(), "Ευρυτίωνας".into(), "Κέντραυροι".into()],
                },
                LabelGroup {
                    name: "Γυναίκες".into(),
                    color: "purple".parse().unwrap(),
                    labels: vec!["Λαπιθίδα".into(), "Ευρυτίωνας".into()],
                },
            ],
        }
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(" Grey ".parse::<Color>().unwrap(), Color::UNMATCHED);
        assert_eq!("#1e90FF".parse::<Color>().unwrap(), Color::rgb(30, 144, 255));
        assert_eq!(Color::rgb(30, 144, 255).to_string(), "#1e90ff");
        assert!("#12345".parse::<Color>().is_err());
        assert!("#zz0000".parse::<Color>().is_err());
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn test_direct_mode() {
        let classifier = Classifier::new(&direct());
        assert_eq!(classifier.mode(), MappingMode::Direct);

        let id = classifier.classify(Some("Αέτωμα")).unwrap();
        assert_eq!(classifier.category(id).name, "Αέτωμα");
        assert_eq!(classifier.color_of(Some("Στήλη")), Color::rgb(255, 0, 0));

        assert_eq!(classifier.classify(Some("Ναός")), None);
        assert_eq!(classifier.color_of(Some("Ναός")), Color::UNMATCHED);
    }

    #[test]
    fn test_grouped_mode_last_group_wins() {
        let classifier = Classifier::new(&grouped());
        assert_eq!(classifier.mode(), MappingMode::Grouped);
        assert_eq!(classifier.mode().heading(), "Team");
        assert_eq!(classifier.categories().len(), 2);

        let a = classifier.classify(Some("Κέντραυροι")).unwrap();
        let b = classifier.classify(Some("Κένταυροι")).unwrap();
        assert_eq!(a, b);
        assert_eq!(classifier.category(a).name, "Κένταυροι");

        let shared = classifier.classify(Some("Ευρυτίωνας")).unwrap();
        assert_eq!(classifier.category(shared).name, "Γυναίκες");
        assert_eq!(classifier.color_of(Some("Ευρυτίωνας")), Color::rgb(128, 0, 128));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let classifier = Classifier::new(&grouped());
        for label in [Some("Λαπιθίδα"), Some("Ευρυτίωνας"), Some("unknown"), None] {
            assert_eq!(classifier.classify(label), classifier.classify(label));
        }
    }

    #[test]
    fn test_missing_label_never_matches() {
        let mapping = CategoryMapping::Direct {
            labels: vec![LabelColor { label: String::new(), color: Color::rgb(0, 0, 0) }],
        };
        let classifier = Classifier::new(&mapping);
        assert_eq!(classifier.classify(None), None);
    }

    #[test]
    fn test_duplicate_direct_label_keeps_position() {
        let mapping = CategoryMapping::Direct {
            labels: vec![
                LabelColor { label: "A".into(), color: "red".parse().unwrap() },
                LabelColor { label: "B".into(), color: "blue".parse().unwrap() },
                LabelColor { label: "A".into(), color: "green".parse().unwrap() },
            ],
        };
        let classifier = Classifier::new(&mapping);
        assert_eq!(classifier.categories().len(), 2);
        assert_eq!(classifier.classify(Some("A")), Some(0));
        assert_eq!(classifier.color_of(Some("A")), Color::rgb(0, 128, 0));
    }
}
