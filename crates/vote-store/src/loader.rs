//! Loader for seed snapshots.
//!
//! A seed snapshot is one JSON document:
//!
//! ```json
//! {
//!   "users":      [{ "id": 1, "interests": ["music"], "city": "Lyon", ... }],
//!   "activities": [{ "id": 10, "name": "Jazz night", "type": "cultural", ... }],
//!   "ballots":    [{ "kind": "ranked", "user_id": 1, "activity_ranking": [10, 20] },
//!                  { "kind": "scored", "user_id": 2, "activity_id": 10, "score": 9 }]
//! }
//! ```
//!
//! Seeded ballots are validated exactly like live submissions, so a snapshot
//! cannot smuggle a duplicate ranking or an out-of-range score into the store.

use crate::error::{Result, VoteError};
use crate::index::ProfileIndex;
use crate::store::BallotStore;
use crate::types::*;
use crate::validation::validate_submission;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// The decoded content of a seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub ballots: Vec<Ballot>,
}

impl SeedData {
    /// Read and decode a seed file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let seed = Self::from_json(&content).map_err(|err| match err {
            VoteError::ParseError { source, .. } => VoteError::ParseError {
                file: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        info!(
            "Loaded seed {:?}: {} users, {} activities, {} ballots",
            path,
            seed.users.len(),
            seed.activities.len(),
            seed.ballots.len()
        );
        Ok(seed)
    }

    /// Decode a seed document held in memory.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|source| VoteError::ParseError {
            file: "<memory>".to_string(),
            source,
        })
    }

    /// Split the snapshot into a profile index and a ballot store.
    ///
    /// Every ballot must pass submission validation against the snapshot's
    /// own activities.
    pub fn into_parts(self) -> Result<(ProfileIndex, BallotStore)> {
        let mut index = ProfileIndex::new();
        for user in self.users {
            index.insert_user(user);
        }
        for activity in self.activities {
            index.insert_activity(activity);
        }

        for ballot in &self.ballots {
            let submission = match ballot {
                Ballot::Ranked(ranked) => Submission::Ranked(ranked.clone()),
                Ballot::Scored(vote) => Submission::Scored(ScoredSubmission {
                    user_id: vote.user_id,
                    votes: vec![ScoreEntry {
                        activity_id: vote.activity_id,
                        score: i64::from(vote.score),
                    }],
                }),
            };
            validate_submission(&submission, Some(&index))?;
        }

        Ok((index, BallotStore::from_ballots(self.ballots)))
    }
}
