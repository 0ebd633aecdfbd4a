//! # Voting Service
//!
//! The facade callers talk to. It owns the shared ballot store and wires
//! the pieces together:
//! 1. Submissions are validated (shape, range, catalog) and stored as ballots
//! 2. Rankings (Schulze, Condorcet, scores) run on a snapshot of the store
//! 3. Recommendations combine the user directory, the stored ballots and the
//!    collaborative recommender, on a blocking worker thread when called async
//!
//! Lookups are injected as traits so the host application decides where
//! users and activities live.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use recommender::{CollaborativeRecommender, Recommendation, RecommenderConfig};
use tally::{ActivityScore, CondorcetResult, SchulzeRanking};
use vote_store::{
    Activity, ActivityCatalog, ActivityId, Ballot, BallotStore, ScoredVote, SeedData, Submission,
    UserDirectory, UserId, VoteError, scored_votes, validate_submission,
};

use crate::config::EngineConfig;

/// Score summary of one activity, with the entries it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityScoreReport {
    pub activity_id: ActivityId,
    pub average_score: f64,
    pub vote_count: usize,
    pub votes: Vec<ScoredVote>,
}

#[derive(Clone)]
pub struct VotingService {
    store: Arc<BallotStore>,
    catalog: Arc<dyn ActivityCatalog>,
    users: Arc<dyn UserDirectory>,
    recommender: Arc<CollaborativeRecommender>,
    validate_activities: bool,
}

impl VotingService {
    pub fn new(
        store: Arc<BallotStore>,
        catalog: Arc<dyn ActivityCatalog>,
        users: Arc<dyn UserDirectory>,
        config: RecommenderConfig,
    ) -> Self {
        let recommender = Arc::new(CollaborativeRecommender::new(users.clone(), config));
        Self {
            store,
            catalog,
            users,
            recommender,
            validate_activities: true,
        }
    }

    /// Build a service from a seed snapshot and an engine configuration.
    pub fn from_seed(seed: SeedData, config: &EngineConfig) -> Result<Self> {
        let (index, store) = seed.into_parts().context("Invalid seed snapshot")?;
        let index = Arc::new(index);

        let mut recommender = CollaborativeRecommender::new(index.clone(), config.recommender.clone());
        if let Some(date) = config.reference_date {
            recommender = recommender.with_reference_date(date);
        }

        Ok(Self {
            store: Arc::new(store),
            catalog: index.clone(),
            users: index,
            recommender: Arc::new(recommender),
            validate_activities: config.validate_activities,
        })
    }

    /// Swap in a recommender built elsewhere (e.g. with a pinned reference date).
    pub fn with_recommender(mut self, recommender: CollaborativeRecommender) -> Self {
        self.recommender = Arc::new(recommender);
        self
    }

    /// Accept submissions for activities the catalog does not list.
    pub fn without_activity_validation(mut self) -> Self {
        self.validate_activities = false;
        self
    }

    /// Validate and store a submission. Returns the number of ballots recorded.
    ///
    /// On error nothing is stored.
    pub fn submit_ballot(&self, submission: &Submission) -> vote_store::Result<usize> {
        let catalog = self.validate_activities.then_some(self.catalog.as_ref());
        let ballots = validate_submission(submission, catalog).inspect_err(|err| {
            warn!("Rejected submission from user {}: {}", submission.user_id(), err);
        })?;

        self.store.add_ballots(&ballots);
        info!(
            "Recorded {} ballot(s) from user {}",
            ballots.len(),
            submission.user_id()
        );
        Ok(ballots.len())
    }

    pub fn list_ballots(&self) -> Vec<Ballot> {
        self.store.list_ballots()
    }

    pub fn reset(&self) {
        self.store.reset_all();
    }

    /// Condorcet winner and Copeland scores over `candidates`.
    pub fn rank_by_condorcet(&self, candidates: &[ActivityId]) -> CondorcetResult {
        tally::rank_by_condorcet(candidates, &self.store.list_ballots())
    }

    /// Schulze ranking of every activity that appears on a stored ranked ballot.
    pub fn rank_by_schulze(&self) -> SchulzeRanking {
        tally::rank_by_schulze(&self.store.list_ballots())
    }

    pub fn score_ranking(&self) -> Vec<ActivityScore> {
        tally::score_ranking(&scored_votes(&self.store.list_ballots()))
    }

    pub fn activity_score(&self, activity_id: ActivityId) -> ActivityScoreReport {
        let votes = self.store.votes_for_activity(activity_id);
        let summary = tally::activity_score(activity_id, &votes);
        ActivityScoreReport {
            activity_id,
            average_score: summary.average_score,
            vote_count: summary.vote_count,
            votes,
        }
    }

    /// Ranked recommendations for a known user among `candidates`.
    #[instrument(skip(self, candidates), fields(candidates = candidates.len()))]
    pub fn recommend(
        &self,
        user_id: UserId,
        candidates: &[Activity],
        max_results: usize,
    ) -> vote_store::Result<Vec<Recommendation>> {
        let user = self
            .users
            .get_user(user_id)
            .ok_or(VoteError::UserNotFound { user_id })?;
        let ballots = self.store.list_ballots();
        Ok(self.recommender.recommend(&user, candidates, &ballots, max_results))
    }

    /// `recommend` on a blocking worker thread.
    pub async fn recommend_for_user(
        &self,
        user_id: UserId,
        candidates: Vec<Activity>,
        max_results: usize,
    ) -> Result<Vec<Recommendation>> {
        let start_time = Instant::now();
        let service = self.clone();
        let recommendations = tokio::task::spawn_blocking(move || {
            service.recommend(user_id, &candidates, max_results)
        })
        .await
        .context("Recommendation task panicked")??;

        info!(
            "Computed {} recommendations for user {} in {:.2?}",
            recommendations.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    pub fn store(&self) -> &BallotStore {
        &self.store
    }
}
