//! Error types for the vote-store crate.
//!
//! Every failure a caller can observe when submitting ballots or loading a
//! seed snapshot. Validation failures are raised before anything reaches the
//! store, so a returned error always means the store is unchanged.

use crate::types::{ActivityId, UserId};
use thiserror::Error;

/// Errors that can occur while validating, storing or loading ballots
#[derive(Error, Debug)]
pub enum VoteError {
    /// A ranked ballot with no activities in it
    #[error("Ranking submitted by user {user_id} is empty")]
    EmptyRanking { user_id: UserId },

    /// A scored submission with no entries
    #[error("Scored submission from user {user_id} contains no votes")]
    EmptySubmission { user_id: UserId },

    /// The same activity appears twice in one submission
    #[error("Activity {activity_id} appears more than once in the submission")]
    DuplicateActivity { activity_id: ActivityId },

    /// Scores are integers from 1 to 10
    #[error("Score {score} for activity {activity_id} is outside 1..=10")]
    ScoreOutOfRange { activity_id: ActivityId, score: i64 },

    /// Referenced activity is not known to the activity catalog
    #[error("Activity with id {activity_id} does not exist")]
    ActivityNotFound { activity_id: ActivityId },

    /// Referenced user is not known to the user directory
    #[error("User with id {user_id} does not exist")]
    UserNotFound { user_id: UserId },

    /// I/O error occurred while reading a seed file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Seed file content could not be decoded
    #[error("Parse error in {file}: {source}")]
    ParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

impl VoteError {
    /// True for errors caused by malformed input rather than missing references.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            VoteError::EmptyRanking { .. }
                | VoteError::EmptySubmission { .. }
                | VoteError::DuplicateActivity { .. }
                | VoteError::ScoreOutOfRange { .. }
        )
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, VoteError>;
