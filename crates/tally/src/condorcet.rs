//! Condorcet winner and Copeland scores.
//!
//! A simpler view than Schulze, computed from the direct pairwise counts
//! without any path closure:
//! - the Condorcet winner beats every other candidate head to head
//! - the Copeland score of a candidate is `wins - losses`, ties counting for neither

use crate::pairwise::{PairwiseEntry, PairwiseMatrix, wins_and_losses};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vote_store::ActivityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopelandScore {
    pub activity_id: ActivityId,
    pub score: i64,
}

/// Pairwise counts, Condorcet winner (if any) and Copeland ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondorcetResult {
    pub pairwise: Vec<PairwiseEntry>,
    pub winner: Option<ActivityId>,
    /// Highest score first; equal scores keep candidate order.
    pub copeland: Vec<CopelandScore>,
}

pub fn condorcet(matrix: &PairwiseMatrix) -> CondorcetResult {
    let records = wins_and_losses(matrix.table());
    let n = matrix.len();

    // Only one candidate can beat all the others.
    let winner = matrix
        .candidates()
        .iter()
        .zip(&records)
        .find(|(_, (wins, _))| *wins == n - 1)
        .map(|(&id, _)| id);

    let mut copeland: Vec<CopelandScore> = matrix
        .candidates()
        .iter()
        .zip(&records)
        .map(|(&activity_id, &(wins, losses))| CopelandScore {
            activity_id,
            score: wins as i64 - losses as i64,
        })
        .collect();
    copeland.sort_by(|a, b| b.score.cmp(&a.score));

    debug!("Condorcet winner: {:?}, copeland: {:?}", winner, copeland);
    CondorcetResult {
        pairwise: matrix.entries(),
        winner,
        copeland,
    }
}
