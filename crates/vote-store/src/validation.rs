//! Submission validation.
//!
//! A submission is checked once, at the boundary, and turned into the ballots
//! that get stored. Nothing here touches the store: a rejected submission
//! leaves it exactly as it was.
//!
//! Checks run in this order:
//! 1. Shape: rankings and scored submissions must not be empty
//! 2. Uniqueness: an activity id may appear only once per submission
//! 3. Range: scores must be within `MIN_SCORE..=MAX_SCORE`
//! 4. Existence: every activity must be known to the catalog (if one is given)

use crate::error::{Result, VoteError};
use crate::traits::ActivityCatalog;
use crate::types::*;
use std::collections::HashSet;
use tracing::debug;

/// Validate a submission and convert it to storable ballots.
///
/// A ranked submission yields one ballot; a scored submission yields one
/// ballot per entry, in submission order.
pub fn validate_submission(
    submission: &Submission,
    catalog: Option<&dyn ActivityCatalog>,
) -> Result<Vec<Ballot>> {
    let ballots = match submission {
        Submission::Ranked(ballot) => {
            if ballot.activity_ranking.is_empty() {
                return Err(VoteError::EmptyRanking {
                    user_id: ballot.user_id,
                });
            }
            ensure_unique(&ballot.activity_ranking)?;
            vec![Ballot::Ranked(ballot.clone())]
        }
        Submission::Scored(scored) => {
            if scored.votes.is_empty() {
                return Err(VoteError::EmptySubmission {
                    user_id: scored.user_id,
                });
            }
            let ids: Vec<ActivityId> = scored.votes.iter().map(|v| v.activity_id).collect();
            ensure_unique(&ids)?;
            scored
                .votes
                .iter()
                .map(|entry| {
                    let score = checked_score(entry)?;
                    Ok(Ballot::Scored(ScoredVote {
                        user_id: scored.user_id,
                        activity_id: entry.activity_id,
                        score,
                    }))
                })
                .collect::<Result<Vec<Ballot>>>()?
        }
    };

    if let Some(catalog) = catalog {
        for activity_id in submission.activity_ids() {
            if !catalog.activity_exists(activity_id) {
                return Err(VoteError::ActivityNotFound { activity_id });
            }
        }
    }

    debug!(
        "Validated submission from user {} into {} ballot(s)",
        submission.user_id(),
        ballots.len()
    );
    Ok(ballots)
}

fn ensure_unique(ids: &[ActivityId]) -> Result<()> {
    let mut seen: HashSet<ActivityId> = HashSet::with_capacity(ids.len());
    for &activity_id in ids {
        if !seen.insert(activity_id) {
            return Err(VoteError::DuplicateActivity { activity_id });
        }
    }
    Ok(())
}

fn checked_score(entry: &ScoreEntry) -> Result<u8> {
    if (MIN_SCORE..=MAX_SCORE).contains(&entry.score) {
        Ok(entry.score as u8)
    } else {
        Err(VoteError::ScoreOutOfRange {
            activity_id: entry.activity_id,
            score: entry.score,
        })
    }
}
