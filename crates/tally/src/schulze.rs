//! Schulze ranking over a pairwise matrix.
//!
//! ## Algorithm
//! 1. `strength[a][b] = counts[a][b]` (direct support)
//! 2. Widest-path closure, Floyd–Warshall style: for every intermediate `k`,
//!    `strength[i][j] = max(strength[i][j], min(strength[i][k], strength[k][j]))`
//! 3. `wins[i]` = number of `j` with `strength[i][j] > strength[j][i]`
//! 4. Candidates sorted by wins, descending
//!
//! ## Known limitation: ties
//! Candidates with equal win counts keep their candidate enumeration order
//! (stable sort). This is not the full Schulze tie-breaking procedure, and it
//! is intentional: changing it changes the output for tied elections.
//!
//! The closure is O(n³) in the number of candidates.

use crate::pairwise::{PairwiseMatrix, wins_and_losses};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};
use vote_store::ActivityId;

/// Strongest-path strengths between every ordered pair of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrongestPaths {
    candidates: Vec<ActivityId>,
    strength: Vec<Vec<u64>>,
}

impl StrongestPaths {
    /// Direct strengths only (step 1), before the closure.
    pub fn direct(matrix: &PairwiseMatrix) -> Self {
        Self {
            candidates: matrix.candidates().to_vec(),
            strength: matrix.table().to_vec(),
        }
    }

    /// Direct strengths closed into strongest paths (steps 1 and 2).
    pub fn from_pairwise(matrix: &PairwiseMatrix) -> Self {
        let mut paths = Self::direct(matrix);
        paths.close();
        paths
    }

    /// Run the closure once. Returns true if any strength changed.
    ///
    /// Strengths only ever grow, and a second call on a closed matrix
    /// changes nothing.
    pub fn close(&mut self) -> bool {
        let n = self.candidates.len();
        let mut changed = false;
        for k in 0..n {
            for i in 0..n {
                if i == k {
                    continue;
                }
                let via_k = self.strength[i][k];
                if via_k == 0 {
                    continue;
                }
                for j in 0..n {
                    if j == k || j == i {
                        continue;
                    }
                    let candidate = via_k.min(self.strength[k][j]);
                    if candidate > self.strength[i][j] {
                        self.strength[i][j] = candidate;
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    pub fn candidates(&self) -> &[ActivityId] {
        &self.candidates
    }

    /// Strongest-path strength from `a` to `b`, zero for unknown ids.
    pub fn strength(&self, a: ActivityId, b: ActivityId) -> u64 {
        let position = |id: ActivityId| self.candidates.iter().position(|&c| c == id);
        match (position(a), position(b)) {
            (Some(i), Some(j)) => self.strength[i][j],
            _ => 0,
        }
    }

    /// Win count of every candidate, in candidate order.
    pub fn wins(&self) -> Vec<usize> {
        wins_and_losses(&self.strength)
            .into_iter()
            .map(|(wins, _)| wins)
            .collect()
    }
}

/// Output of the Schulze method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchulzeRanking {
    /// Winner first.
    pub order: Vec<ActivityId>,
    /// (candidate, win count) in the same order as `order`.
    pub wins: Vec<(ActivityId, usize)>,
}

impl SchulzeRanking {
    pub fn winner(&self) -> Option<ActivityId> {
        self.order.first().copied()
    }

    pub fn wins_by_candidate(&self) -> HashMap<ActivityId, usize> {
        self.wins.iter().copied().collect()
    }
}

/// Rank the candidates of a pairwise matrix with the Schulze method.
///
/// An empty matrix gives an empty ranking.
#[instrument(skip_all, fields(candidates = matrix.len()))]
pub fn schulze_ranking(matrix: &PairwiseMatrix) -> SchulzeRanking {
    let paths = StrongestPaths::from_pairwise(matrix);
    let wins = paths.wins();

    let mut ranked: Vec<(ActivityId, usize)> = paths
        .candidates()
        .iter()
        .copied()
        .zip(wins)
        .collect();
    // Stable: equal win counts keep enumeration order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    debug!("Schulze ranking: {:?}", ranked);
    SchulzeRanking {
        order: ranked.iter().map(|(id, _)| *id).collect(),
        wins: ranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vote_store::RankedBallot;

    fn matrix(candidates: &[ActivityId], raw: &[&[ActivityId]]) -> PairwiseMatrix {
        let owned: Vec<RankedBallot> = raw
            .iter()
            .enumerate()
            .map(|(user, ranking)| RankedBallot::new(user as u32, ranking.to_vec()))
            .collect();
        let refs: Vec<&RankedBallot> = owned.iter().collect();
        PairwiseMatrix::from_ballots(candidates, &refs)
    }

    #[test]
    fn test_scenario_two_ahead_of_one() {
        let m = matrix(&[2, 1, 3], &[&[2, 1, 3], &[1, 2, 3], &[2, 3, 1]]);
        let ranking = schulze_ranking(&m);
        assert_eq!(ranking.order, vec![2, 1, 3]);
        assert_eq!(ranking.wins, vec![(2, 2), (1, 1), (3, 0)]);
        assert_eq!(ranking.winner(), Some(2));
    }

    #[test]
    fn test_closure_finds_indirect_paths() {
        // 1>2 and 2>3 directly, 3>1 is weaker than the 1>2>3 path.
        let m = matrix(&[1, 2, 3], &[&[1, 2, 3], &[1, 2, 3], &[2, 3, 1], &[3, 1, 2]]);
        let direct = StrongestPaths::direct(&m);
        let closed = StrongestPaths::from_pairwise(&m);
        for &a in m.candidates() {
            for &b in m.candidates() {
                assert!(closed.strength(a, b) >= direct.strength(a, b));
            }
        }
    }

    #[test]
    fn test_closure_is_idempotent() {
        let m = matrix(
            &[1, 2, 3, 4],
            &[&[1, 2, 3, 4], &[2, 3, 4, 1], &[3, 4, 1, 2], &[4, 1], &[2, 4]],
        );
        let mut paths = StrongestPaths::from_pairwise(&m);
        let snapshot = paths.clone();
        assert!(!paths.close());
        assert_eq!(paths, snapshot);
    }

    #[test]
    fn test_condorcet_cycle_resolved_by_strength() {
        // 5 voters A>B>C, 4 voters B>C>A, 2 voters C>A>B
        // A>B 7:4, B>C 9:2, C>A 6:5: a Condorcet cycle.
        let abc: &[ActivityId] = &[1, 2, 3];
        let bca: &[ActivityId] = &[2, 3, 1];
        let cab: &[ActivityId] = &[3, 1, 2];
        let mut raw: Vec<&[ActivityId]> = Vec::new();
        raw.extend(std::iter::repeat_n(abc, 5));
        raw.extend(std::iter::repeat_n(bca, 4));
        raw.extend(std::iter::repeat_n(cab, 2));
        let m = matrix(&[1, 2, 3], &raw);

        let ranking = schulze_ranking(&m);
        assert_eq!(ranking.winner(), Some(1));
        // A>C via B is min(7, 9) = 7, stronger than C>A at 6.
        assert_eq!(ranking.order, vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        // Two candidates, one ballot each way: a perfect tie.
        let m = matrix(&[7, 3], &[&[7, 3], &[3, 7]]);
        assert_eq!(schulze_ranking(&m).order, vec![7, 3]);

        let reversed = matrix(&[3, 7], &[&[7, 3], &[3, 7]]);
        assert_eq!(schulze_ranking(&reversed).order, vec![3, 7]);
    }

    #[test]
    fn test_empty_matrix_gives_empty_ranking() {
        let ranking = schulze_ranking(&PairwiseMatrix::from_ballots(&[], &[]));
        assert!(ranking.order.is_empty());
        assert_eq!(ranking.winner(), None);
    }

    #[test]
    fn test_single_candidate() {
        let m = matrix(&[4], &[&[4]]);
        let ranking = schulze_ranking(&m);
        assert_eq!(ranking.order, vec![4]);
        assert_eq!(ranking.wins, vec![(4, 0)]);
    }
}
