//! # Tally Crate
//!
//! Ranking methods over stored ballots.
//!
//! ## Components
//!
//! ### Pairwise matrix
//! How many ranked ballots prefer each activity over each other activity.
//! Activities left off a ballot count as ranked below every listed one.
//!
//! ### Schulze
//! Strongest-path closure over the pairwise matrix, then activities ordered
//! by the number of opponents they beat.
//!
//! ### Condorcet / Copeland
//! Head-to-head winner (if one exists) and `wins - losses` per activity, on
//! direct pairwise counts.
//!
//! ### Scores
//! Average of scored ballots per activity, rounded to two decimals.
//!
//! ## Example Usage
//!
//! ```ignore
//! use tally::{rank_by_schulze, score_ranking};
//! use vote_store::scored_votes;
//!
//! let ballots = store.list_ballots();
//! let schulze = rank_by_schulze(&ballots);
//! println!("winner: {:?}", schulze.winner());
//!
//! for entry in score_ranking(&scored_votes(&ballots)) {
//!     println!("{} -> {:.2}", entry.activity_id, entry.average_score);
//! }
//! ```

pub mod condorcet;
pub mod pairwise;
pub mod schulze;
pub mod scores;

pub use condorcet::{CondorcetResult, CopelandScore, condorcet};
pub use pairwise::{PairwiseEntry, PairwiseMatrix, candidate_set};
pub use schulze::{SchulzeRanking, StrongestPaths, schulze_ranking};
pub use scores::{ActivityScore, activity_score, score_ranking};

use vote_store::{ActivityId, Ballot, ranked_ballots};

/// Schulze ranking of every activity that appears on a ranked ballot.
///
/// Scored ballots are ignored. Candidates are enumerated in order of first
/// appearance, which is also the tie-break order.
pub fn rank_by_schulze(ballots: &[Ballot]) -> SchulzeRanking {
    let ranked = ranked_ballots(ballots);
    let candidates = candidate_set(&ranked);
    schulze_ranking(&PairwiseMatrix::from_ballots(&candidates, &ranked))
}

/// Condorcet analysis of the given candidates over the ranked ballots.
pub fn rank_by_condorcet(candidates: &[ActivityId], ballots: &[Ballot]) -> CondorcetResult {
    let ranked = ranked_ballots(ballots);
    condorcet(&PairwiseMatrix::from_ballots(candidates, &ranked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vote_store::{RankedBallot, ScoredVote};

    #[test]
    fn test_rank_by_schulze_skips_scored_ballots() {
        let ballots = vec![
            Ballot::Scored(ScoredVote {
                user_id: 1,
                activity_id: 9,
                score: 10,
            }),
            Ballot::Ranked(RankedBallot::new(2, vec![3, 1])),
        ];
        let ranking = rank_by_schulze(&ballots);
        assert_eq!(ranking.order, vec![3, 1]);
    }

    #[test]
    fn test_rank_by_condorcet_with_unvoted_candidate() {
        let ballots = vec![Ballot::Ranked(RankedBallot::new(1, vec![1, 2]))];
        let result = rank_by_condorcet(&[1, 2, 5], &ballots);
        // 5 is on no ballot and loses to both ranked activities.
        assert_eq!(result.winner, Some(1));
        assert_eq!(result.copeland.last().map(|c| c.activity_id), Some(5));
    }

    #[test]
    fn test_no_ballots() {
        assert!(rank_by_schulze(&[]).order.is_empty());
        assert_eq!(rank_by_condorcet(&[1, 2], &[]).winner, None);
    }
}
