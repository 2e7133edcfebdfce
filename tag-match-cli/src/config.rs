//! Run configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tag_match::{CategoryMapping, ColumnNames, LoaderConfig, DEFAULT_FRAME_RATE};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub columns: ColumnNames,
    pub categories: CategoryMapping,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub reference: Option<PathBuf>,
    #[serde(default)]
    pub observations: Vec<PathBuf>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            reference: None,
            observations: Vec::new(),
            delimiter: default_delimiter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_report")]
    pub report: PathBuf,
    #[serde(default)]
    pub format: ReportFormat,
    #[serde(default = "default_timeline")]
    pub timeline: PathBuf,
    #[serde(default = "default_legend")]
    pub legend: PathBuf,
    #[serde(default = "default_true")]
    pub plot: bool,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_reference_name")]
    pub reference_name: String,
    #[serde(default = "default_observation_name")]
    pub observation_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report: default_report(),
            format: ReportFormat::default(),
            timeline: default_timeline(),
            legend: default_legend(),
            plot: true,
            title: default_title(),
            reference_name: default_reference_name(),
            observation_name: default_observation_name(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Txt,
    Json,
}

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

fn default_delimiter() -> char {
    ','
}

fn default_report() -> PathBuf {
    PathBuf::from("comparison_results.txt")
}

fn default_timeline() -> PathBuf {
    PathBuf::from("timeline.svg")
}

fn default_legend() -> PathBuf {
    PathBuf::from("legend.svg")
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    "Video Clips Comparison Timeline".to_string()
}

fn default_reference_name() -> String {
    "Sound".to_string()
}

fn default_observation_name() -> String {
    "Video".to_string()
}

/// Problems with a parsed configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no reference track given (set input.reference or pass --reference)")]
    MissingReference,

    #[error("no observation tracks given (set input.observations or pass --observation)")]
    NoObservations,

    #[error("delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),

    #[error("frame rate must be positive")]
    ZeroFrameRate,

    #[error("category mapping is empty")]
    EmptyMapping,
}

impl AppConfig {
    /// Make relative paths relative to `base` (the config file's directory)
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        if let Some(reference) = self.input.reference.as_mut() {
            resolve(reference);
        }
        self.input.observations.iter_mut().for_each(resolve);
        resolve(&mut self.output.report);
        resolve(&mut self.output.timeline);
        resolve(&mut self.output.legend);
    }

    /// Check the settings a run cannot proceed without
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.input.reference.is_none() {
            return Err(ConfigError::MissingReference);
        }
        if self.input.observations.is_empty() {
            return Err(ConfigError::NoObservations);
        }
        if !self.input.delimiter.is_ascii() {
            return Err(ConfigError::InvalidDelimiter(self.input.delimiter));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        let empty = match &self.categories {
            CategoryMapping::Direct { labels } => labels.is_empty(),
            CategoryMapping::Grouped { groups } => groups.is_empty(),
        };
        if empty {
            return Err(ConfigError::EmptyMapping);
        }
        Ok(())
    }

    /// Loader settings derived from this configuration
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig::new()
            .with_frame_rate(self.frame_rate)
            .with_delimiter(self.input.delimiter as u8)
            .with_columns(self.columns.clone())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }

    Ok(config)
}
