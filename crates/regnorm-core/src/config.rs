// crates/regnorm-core/src/config.rs
use crate::error::Result;
use crate::scoring::WeightConfig;
use crate::model::Catalog;
use crate::search::{RegionMatcher, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Everything a caller tunes about a match run.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```json
/// { "threshold": 70, "weights": { "metric_weights": { "token_set": 1.0 } } }
/// ```
///
/// Note that a `metric_weights` map given in a file replaces the default map
/// as a whole; metrics it leaves out are not used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default)]
    pub weights: WeightConfig,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Expand whole-string abbreviations (`спб`, `хмао`) before matching.
    #[serde(default = "default_true")]
    pub expand_abbreviations: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            weights: WeightConfig::default(),
            threshold: DEFAULT_THRESHOLD,
            expand_abbreviations: true,
        }
    }
}

impl MatchConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// A matcher over `catalog` honouring `expand_abbreviations`.
    pub fn matcher<'a>(&self, catalog: &'a Catalog) -> RegionMatcher<'a> {
        let matcher = RegionMatcher::new(catalog);
        if self.expand_abbreviations {
            matcher
        } else {
            matcher.without_abbreviations()
        }
    }

    /// Parses a JSON config.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads a config file; `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        );
        if is_yaml {
            Self::from_yaml_str(&text)
        } else {
            Self::from_json_text(&text)
        }
    }

    #[cfg(feature = "yaml")]
    fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    #[cfg(not(feature = "yaml"))]
    fn from_yaml_str(_: &str) -> Result<Self> {
        Err(crate::error::RegionError::InvalidData(
            "YAML configs need the 'yaml' feature".into(),
        ))
    }

    #[cfg(feature = "json")]
    fn from_json_text(s: &str) -> Result<Self> {
        Self::from_json_str(s)
    }

    #[cfg(not(feature = "json"))]
    fn from_json_text(_: &str) -> Result<Self> {
        Err(crate::error::RegionError::InvalidData(
            "JSON configs need the 'json' feature".into(),
        ))
    }
}
