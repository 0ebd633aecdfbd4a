//! Profile similarity between two users.
//!
//! ## Algorithm
//! Each component is only counted when both users have the field it reads:
//!
//! | component           | gated on                  | value                                        |
//! |---------------------|---------------------------|----------------------------------------------|
//! | interests           | both lists non-empty      | Jaccard index of the two interest sets       |
//! | age                 | both birth dates          | `1 - min(abs(age1 - age2) / span, 1)`        |
//! | location            | both cities               | same city 1, same country 0.5, else 0        |
//! | activity preference | both preferences          | equal 1, one side `either` 0.5, else 0       |
//! | gender              | both genders              | equal 1, else 0                              |
//!
//! The result is `Σ weight × value / Σ weight` over the gated-on components,
//! so missing data neither helps nor hurts. Nothing gated on gives 0.
//! City and country compare case-insensitively, gender does not. Country only
//! matters once both cities are known. A span of 0 years or less only counts
//! equal ages as close.

use crate::config::{RecommenderConfig, SimilarityWeights};
use chrono::{Datelike, Local, NaiveDate};
use std::collections::HashSet;
use std::hash::Hash;
use vote_store::{ActivityPreference, UserProfile};

#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    weights: SimilarityWeights,
    age_span_years: f64,
    /// Date ages are computed on; today when unset.
    as_of: Option<NaiveDate>,
}

impl SimilarityEngine {
    pub fn new(config: &RecommenderConfig) -> Self {
        Self {
            weights: config.weights,
            age_span_years: config.age_span_years,
            as_of: None,
        }
    }

    /// Pin the date ages are computed on (default: today).
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Similarity in `[0, 1]`.
    pub fn similarity(&self, a: &UserProfile, b: &UserProfile) -> f64 {
        let w = &self.weights;
        let components = [
            (w.interests, interest_overlap(a, b)),
            (w.age, self.age_closeness(a, b)),
            (w.location, location_match(a, b)),
            (w.activity_preference, preference_match(a, b)),
            (w.gender, gender_match(a, b)),
        ];

        let (score, total_weight) = components
            .iter()
            .filter_map(|&(weight, value)| value.map(|v| (weight * v, weight)))
            .fold((0.0, 0.0), |(s, t), (ws, w)| (s + ws, t + w));

        if total_weight > 0.0 {
            score / total_weight
        } else {
            0.0
        }
    }

    fn age_closeness(&self, a: &UserProfile, b: &UserProfile) -> Option<f64> {
        let (born_a, born_b) = (a.birth_date?, b.birth_date?);
        let today = self.as_of.unwrap_or_else(|| Local::now().date_naive());
        let diff = (age_on(born_a, today) - age_on(born_b, today)).abs() as f64;
        if self.age_span_years <= 0.0 {
            return Some(if diff == 0.0 { 1.0 } else { 0.0 });
        }
        Some(1.0 - (diff / self.age_span_years).min(1.0))
    }
}

/// Whole years between `birth` and `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let before_birthday = (today.month(), today.day()) < (birth.month(), birth.day());
    today.year() - birth.year() - i32::from(before_birthday)
}

fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

fn interest_overlap(a: &UserProfile, b: &UserProfile) -> Option<f64> {
    if a.interests.is_empty() || b.interests.is_empty() {
        return None;
    }
    let set_a: HashSet<&str> = a.interests.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.interests.iter().map(String::as_str).collect();
    Some(jaccard(&set_a, &set_b))
}

fn same_text(a: &Option<String>, b: &Option<String>) -> Option<bool> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.to_lowercase() == b.to_lowercase()),
        _ => None,
    }
}

fn location_match(a: &UserProfile, b: &UserProfile) -> Option<f64> {
    let same_city = same_text(&a.city, &b.city)?;
    Some(if same_city {
        1.0
    } else if same_text(&a.country, &b.country) == Some(true) {
        0.5
    } else {
        0.0
    })
}

fn preference_match(a: &UserProfile, b: &UserProfile) -> Option<f64> {
    let (pa, pb) = (a.activity_preference?, b.activity_preference?);
    Some(if pa == pb {
        1.0
    } else if pa == ActivityPreference::Either || pb == ActivityPreference::Either {
        0.5
    } else {
        0.0
    })
}

fn gender_match(a: &UserProfile, b: &UserProfile) -> Option<f64> {
    match (&a.gender, &b.gender) {
        (Some(ga), Some(gb)) => Some(if ga == gb { 1.0 } else { 0.0 }),
        _ => None,
    }
}
