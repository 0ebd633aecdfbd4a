//! # Vote Store Crate
//!
//! This crate holds the data side of the activity voting engine.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Ballot, Submission, Activity, UserProfile)
//! - **store**: The shared in-memory `BallotStore`
//! - **validation**: Submission checks applied before anything is stored
//! - **traits**: `UserDirectory` / `ActivityCatalog` lookups owned by the host app
//! - **index**: `ProfileIndex`, an in-memory implementation of both lookups
//! - **loader**: Seed snapshots (users, activities, ballots) from JSON
//! - **error**: Error types for validation and loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use vote_store::{BallotStore, RankedBallot, Submission, validate_submission};
//!
//! let store = BallotStore::new();
//! let submission = Submission::Ranked(RankedBallot::new(1, vec![2, 1, 3]));
//! let ballots = validate_submission(&submission, Some(&catalog))?;
//! store.add_ballots(&ballots);
//!
//! println!("{} ballots stored", store.len());
//! ```

// Public modules
pub mod error;
pub mod index;
pub mod loader;
pub mod store;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export commonly used types for convenience
pub use error::{Result, VoteError};
pub use index::ProfileIndex;
pub use loader::SeedData;
pub use store::BallotStore;
pub use traits::{ActivityCatalog, UserDirectory};
pub use types::{
    // Type aliases
    ActivityId,
    UserId,
    // Ballots
    Ballot,
    RankedBallot,
    ScoredVote,
    ScoreEntry,
    ScoredSubmission,
    Submission,
    // Catalog types
    Activity,
    ActivityPreference,
    ActivityType,
    UserProfile,
    // Helpers
    ranked_ballots,
    scored_votes,
    MAX_SCORE,
    MIN_SCORE,
};
pub use validation::validate_submission;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_through_validation_into_store() {
        let store = BallotStore::new();
        let submission = Submission::Ranked(RankedBallot::new(1, vec![2, 1, 3]));

        let ballots = validate_submission(&submission, None).unwrap();
        store.add_ballots(&ballots);

        assert_eq!(store.len(), 1);
        assert_eq!(ranked_ballots(&store.list_ballots())[0].position_of(3), Some(2));
    }

    #[test]
    fn test_rejected_submission_leaves_store_unchanged() {
        let store = BallotStore::new();
        store.add_ballot(&Ballot::Ranked(RankedBallot::new(9, vec![4])));

        let submission = Submission::Ranked(RankedBallot::new(1, vec![1, 2, 2]));
        if let Ok(ballots) = validate_submission(&submission, None) {
            store.add_ballots(&ballots);
        }

        assert_eq!(store.list_ballots(), vec![Ballot::Ranked(RankedBallot::new(9, vec![4]))]);
    }

    #[test]
    fn test_split_helpers() {
        let ballots = vec![
            Ballot::Ranked(RankedBallot::new(1, vec![1])),
            Ballot::Scored(ScoredVote {
                user_id: 2,
                activity_id: 1,
                score: 3,
            }),
        ];
        assert_eq!(ranked_ballots(&ballots).len(), 1);
        assert_eq!(scored_votes(&ballots)[0].score, 3);
    }
}
