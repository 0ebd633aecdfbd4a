//! Collaborative recommender - "users like you ranked these highly"
//!
//! ## Algorithm
//! 1. Score every other user of the directory against the target profile
//!    and keep those at or above `min_similarity`
//! 2. Build each neighbour's preference profile from their ranked ballots,
//!    scale it by their similarity, and keep the best weighted value per activity
//! 3. For each candidate activity, start from that aggregated value (0 if absent)
//!    - × `interest_boost` if one of the user's interests appears in the type label
//!    - × `preference_boost` if the indoor flag matches an indoor/outdoor preference
//! 4. Drop zero scores, sort descending, keep `max_results`
//!
//! No neighbours means no recommendations; there is no popularity fallback.

use crate::config::RecommenderConfig;
use crate::profile::preference_profile;
use crate::similarity::SimilarityEngine;
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};
use vote_store::{Activity, ActivityId, Ballot, UserDirectory, UserId, UserProfile};

/// A user whose profile is close enough to the target's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarUser {
    pub user_id: UserId,
    pub similarity: f64,
}

/// A candidate activity with its final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub activity: Activity,
    pub score: f64,
}

pub struct CollaborativeRecommender {
    /// Read-only user lookup shared with the rest of the service
    users: Arc<dyn UserDirectory>,

    config: RecommenderConfig,

    similarity: SimilarityEngine,
}

impl CollaborativeRecommender {
    pub fn new(users: Arc<dyn UserDirectory>, config: RecommenderConfig) -> Self {
        let similarity = SimilarityEngine::new(&config);
        Self {
            users,
            config,
            similarity,
        }
    }

    /// Compute ages on a fixed date instead of today.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.similarity = self.similarity.with_reference_date(date);
        self
    }

    /// Every other known user with similarity >= `min_similarity`, most
    /// similar first (directory order on ties).
    pub fn find_similar_users(&self, user: &UserProfile) -> Vec<SimilarUser> {
        let mut similar: Vec<SimilarUser> = self
            .users
            .user_ids()
            .par_iter()
            .filter(|&&other_id| other_id != user.id)
            .filter_map(|&other_id| {
                let other = self.users.get_user(other_id)?;
                let similarity = self.similarity.similarity(user, &other);
                (similarity >= self.config.min_similarity).then_some(SimilarUser {
                    user_id: other_id,
                    similarity,
                })
            })
            .collect();

        similar.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        similar
    }

    /// Best similarity-weighted preference per activity across the neighbours.
    pub fn aggregate_preferences(
        &self,
        similar: &[SimilarUser],
        ballots: &[Ballot],
    ) -> HashMap<ActivityId, f64> {
        similar
            .par_iter()
            .fold(HashMap::new, |mut local: HashMap<ActivityId, f64>, neighbour| {
                for (activity_id, value) in preference_profile(neighbour.user_id, ballots) {
                    merge_max(&mut local, activity_id, value * neighbour.similarity);
                }
                local
            })
            .reduce(HashMap::new, |mut acc, local| {
                for (activity_id, value) in local {
                    merge_max(&mut acc, activity_id, value);
                }
                acc
            })
    }

    /// Score `candidates` for `user` from the ranked ballots of similar users.
    #[instrument(skip_all, fields(user_id = user.id, candidates = candidates.len()))]
    pub fn recommend(
        &self,
        user: &UserProfile,
        candidates: &[Activity],
        ballots: &[Ballot],
        max_results: usize,
    ) -> Vec<Recommendation> {
        let similar = self.find_similar_users(user);
        debug!("Found {} similar users", similar.len());
        if similar.is_empty() {
            return Vec::new();
        }

        let preferences = self.aggregate_preferences(&similar, ballots);

        let mut scored: Vec<Recommendation> = candidates
            .iter()
            .filter_map(|activity| {
                let score = self.score_activity(user, activity, &preferences);
                (score > 0.0).then(|| Recommendation {
                    activity: activity.clone(),
                    score,
                })
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(max_results);

        debug!("Recommending {} activities", scored.len());
        scored
    }

    fn score_activity(
        &self,
        user: &UserProfile,
        activity: &Activity,
        preferences: &HashMap<ActivityId, f64>,
    ) -> f64 {
        let mut score = preferences.get(&activity.id).copied().unwrap_or(0.0);

        let label = activity.activity_type.label();
        if user
            .interests
            .iter()
            .any(|interest| label.contains(interest.to_lowercase().as_str()))
        {
            score *= self.config.interest_boost;
        }

        if user
            .activity_preference
            .is_some_and(|preference| preference.matches_indoor(activity.is_indoor))
        {
            score *= self.config.preference_boost;
        }

        score
    }
}

fn merge_max(map: &mut HashMap<ActivityId, f64>, activity_id: ActivityId, value: f64) {
    map.entry(activity_id)
        .and_modify(|best| *best = best.max(value))
        .or_insert(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use vote_store::{ActivityPreference, ActivityType, ProfileIndex, RankedBallot};

    fn activity(id: ActivityId, activity_type: ActivityType, is_indoor: bool) -> Activity {
        Activity {
            id,
            name: format!("Activity {}", id),
            activity_type,
            location: "Lyon".to_string(),
            is_indoor,
            date: "2024-03-15".to_string(),
            description: None,
        }
    }

    fn user(id: UserId, interests: &[&str], preference: ActivityPreference) -> UserProfile {
        UserProfile {
            interests: interests.iter().map(|s| s.to_string()).collect(),
            city: Some("Lyon".to_string()),
            activity_preference: Some(preference),
            ..UserProfile::new(id)
        }
    }

    /// Users 1-3 share everything; user 4 has nothing in common with them.
    fn create_test_index() -> ProfileIndex {
        let mut index = ProfileIndex::new();
        index.insert_user(user(1, &["Sports"], ActivityPreference::Outdoor));
        index.insert_user(user(2, &["Sports"], ActivityPreference::Outdoor));
        index.insert_user(user(3, &["Sports"], ActivityPreference::Outdoor));
        index.insert_user(UserProfile {
            interests: vec!["chess".to_string()],
            city: Some("Oslo".to_string()),
            activity_preference: Some(ActivityPreference::Indoor),
            ..UserProfile::new(4)
        });
        index
    }

    fn ballots() -> Vec<Ballot> {
        vec![
            Ballot::Ranked(RankedBallot::new(2, vec![10, 20])),
            Ballot::Ranked(RankedBallot::new(3, vec![20, 30])),
            Ballot::Ranked(RankedBallot::new(4, vec![40])),
        ]
    }

    fn recommender(index: ProfileIndex) -> CollaborativeRecommender {
        CollaborativeRecommender::new(Arc::new(index), RecommenderConfig::default())
    }

    #[test]
    fn test_find_similar_users() {
        let index = create_test_index();
        let target = index.get_user(1).cloned().unwrap();
        let similar = recommender(index).find_similar_users(&target);

        let ids: Vec<UserId> = similar.iter().map(|s| s.user_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(similar.iter().all(|s| (s.similarity - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_aggregate_keeps_max() {
        let rec = recommender(create_test_index());
        let similar = vec![
            SimilarUser { user_id: 2, similarity: 1.0 },
            SimilarUser { user_id: 3, similarity: 0.5 },
        ];
        let prefs = rec.aggregate_preferences(&similar, &ballots());
        assert_eq!(prefs[&10], 1.0);
        assert_eq!(prefs[&20], 0.5);
        assert_eq!(prefs[&30], 0.25);
        assert!(!prefs.contains_key(&40));
    }

    #[test]
    fn test_recommend_applies_boosts() {
        let index = create_test_index();
        let target = index.get_user(1).cloned().unwrap();
        let candidates = vec![
            activity(10, ActivityType::Cultural, true),
            activity(20, ActivityType::Sports, false),
            activity(30, ActivityType::Community, true),
            activity(40, ActivityType::Sports, false),
            activity(50, ActivityType::Sports, false),
        ];
        let results = recommender(index).recommend(&target, &candidates, &ballots(), 10);

        let ids: Vec<ActivityId> = results.iter().map(|r| r.activity.id).collect();
        // 20: 1.0 × 1.2 × 1.1; 10: 1.0; 30: 0.5. 40 and 50 score 0.
        assert_eq!(ids, vec![20, 10, 30]);
        assert!((results[0].score - 1.32).abs() < 1e-9);
        assert_eq!(results[1].score, 1.0);
        assert_eq!(results[2].score, 0.5);
    }

    #[test]
    fn test_recommend_truncates() {
        let index = create_test_index();
        let target = index.get_user(1).cloned().unwrap();
        let candidates = vec![
            activity(10, ActivityType::Cultural, true),
            activity(20, ActivityType::Sports, false),
        ];
        let results = recommender(index).recommend(&target, &candidates, &ballots(), 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].activity.id, 20);
    }

    #[test]
    fn test_threshold_excluding_everyone_gives_empty() {
        let index = create_test_index();
        let target = index.get_user(1).cloned().unwrap();
        let strict = CollaborativeRecommender::new(
            Arc::new(index),
            RecommenderConfig::default().with_min_similarity(1.5),
        );
        let candidates = vec![activity(10, ActivityType::Cultural, true)];
        assert!(strict.recommend(&target, &candidates, &ballots(), 5).is_empty());
    }

    #[test]
    fn test_no_ballots_gives_empty() {
        let index = create_test_index();
        let target = index.get_user(1).cloned().unwrap();
        let candidates = vec![activity(20, ActivityType::Sports, false)];
        assert!(recommender(index).recommend(&target, &candidates, &[], 5).is_empty());
    }
}
