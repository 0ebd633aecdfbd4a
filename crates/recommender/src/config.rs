//! Recommender configuration.
//!
//! Built once and handed to the recommender; nothing mutates it afterwards.
//! Every field has a default so a partial JSON object is a valid config.

use serde::{Deserialize, Serialize};

/// Weight of each similarity component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityWeights {
    pub interests: f64,
    pub age: f64,
    pub location: f64,
    pub activity_preference: f64,
    pub gender: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            interests: 3.0,
            age: 2.0,
            location: 1.5,
            activity_preference: 1.0,
            gender: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Users below this similarity are not used as neighbours
    pub min_similarity: f64,

    /// Multiplier when a user interest matches the activity type label
    pub interest_boost: f64,

    /// Multiplier when the activity's indoor flag matches the user preference
    pub preference_boost: f64,

    /// Age difference (years) at which the age component reaches 0.
    /// 0 or less means only equal ages count as close.
    pub age_span_years: f64,

    pub weights: SimilarityWeights,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            min_similarity: 0.3,
            interest_boost: 1.2,
            preference_boost: 1.1,
            age_span_years: 20.0,
            weights: SimilarityWeights::default(),
        }
    }
}

impl RecommenderConfig {
    pub fn with_min_similarity(mut self, threshold: f64) -> Self {
        self.min_similarity = threshold;
        self
    }

    pub fn with_weights(mut self, weights: SimilarityWeights) -> Self {
        self.weights = weights;
        self
    }
}
