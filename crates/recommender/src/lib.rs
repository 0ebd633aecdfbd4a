//! # Recommender Crate
//!
//! Collaborative activity recommendations for the voting engine.
//!
//! ## Components
//!
//! ### Similarity
//! Weighted profile similarity (interests, age, location, indoor/outdoor
//! preference, gender). Only fields both users filled in are compared.
//!
//! ### Preference profiles
//! What a user's ranked ballots say about each activity, from 1.0 for a
//! first choice down to `1/L` for the last of `L`.
//!
//! ### Collaborative recommender
//! "Users similar to you ranked these highly": neighbours above a similarity
//! threshold, their profiles weighted by similarity, then interest and
//! indoor/outdoor boosts on the candidate activities.
//!
//! ### Weather
//! Indoor/outdoor candidate filtering from a weather condition.
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::{CollaborativeRecommender, RecommenderConfig, WeatherPreference};
//! use std::sync::Arc;
//!
//! let recommender = CollaborativeRecommender::new(Arc::new(index), RecommenderConfig::default());
//! let candidates = WeatherPreference::for_condition("rain").filter_candidates(&activities);
//!
//! for rec in recommender.recommend(&user, &candidates, &store.list_ballots(), 5) {
//!     println!("{} ({:.2})", rec.activity.name, rec.score);
//! }
//! ```

pub mod collaborative;
pub mod config;
pub mod profile;
pub mod similarity;
pub mod weather;

pub use collaborative::{CollaborativeRecommender, Recommendation, SimilarUser};
pub use config::{RecommenderConfig, SimilarityWeights};
pub use profile::{PreferenceProfile, preference_profile, preference_profiles};
pub use similarity::{SimilarityEngine, age_on};
pub use weather::WeatherPreference;
