//! Engine configuration file.
//!
//! A JSON object, every field optional:
//!
//! ```json
//! {
//!   "seed_path": "data/seed.json",
//!   "max_recommendations": 5,
//!   "validate_activities": true,
//!   "reference_date": "2024-06-01",
//!   "recommender": { "min_similarity": 0.3, "weights": { "interests": 3.0 } }
//! }
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use recommender::RecommenderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed snapshot loaded at startup
    pub seed_path: PathBuf,

    /// Recommendations returned when the caller gives no limit
    pub max_recommendations: usize,

    /// Reject submissions naming activities missing from the catalog
    pub validate_activities: bool,

    /// Date ages are computed on; today when absent
    pub reference_date: Option<NaiveDate>,

    pub recommender: RecommenderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed_path: PathBuf::from("data/seed.json"),
            max_recommendations: 5,
            validate_activities: true,
            reference_date: None,
            recommender: RecommenderConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        info!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
