//! Pairwise comparison of candidates over ranked ballots.
//!
//! ## Omitted activities rank last
//!
//! Leaving an activity off a ballot is NOT abstention. It is read as ranking
//! that activity below every activity the voter did rank:
//!
//! | a ranked | b ranked | effect                                  |
//! |----------|----------|-----------------------------------------|
//! | yes      | yes      | `counts[a][b] += 1` if a is ahead of b  |
//! | yes      | no       | `counts[a][b] += 1`                     |
//! | no       | yes      | `counts[b][a] += 1`                     |
//! | no       | no       | nothing                                 |
//!
//! This rule decides winners in elections with short ballots. Keep it.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};
use vote_store::{ActivityId, RankedBallot};

/// One ordered pair of the matrix: `count` ballots prefer `winner` over `loser`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseEntry {
    pub winner: ActivityId,
    pub loser: ActivityId,
    pub count: u64,
}

/// Counts of ballots preferring one candidate over another.
///
/// Candidates are kept in the order they were given; that order is the
/// tie-break order of every ranking derived from this matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairwiseMatrix {
    candidates: Vec<ActivityId>,
    index: HashMap<ActivityId, usize>,
    /// counts[i][j] = ballots preferring candidates[i] over candidates[j]
    counts: Vec<Vec<u64>>,
}

/// Every activity that appears in a ranked ballot, in order of first appearance.
pub fn candidate_set(ballots: &[&RankedBallot]) -> Vec<ActivityId> {
    let mut seen: HashSet<ActivityId> = HashSet::new();
    let mut candidates = Vec::new();
    for ballot in ballots {
        for &activity_id in &ballot.activity_ranking {
            if seen.insert(activity_id) {
                candidates.push(activity_id);
            }
        }
    }
    candidates
}

impl PairwiseMatrix {
    /// Count pairwise preferences of `ballots` over `candidates`.
    ///
    /// Repeated candidate ids keep their first position. Ballot entries that
    /// are not candidates are ignored.
    #[instrument(skip_all, fields(candidates = candidates.len(), ballots = ballots.len()))]
    pub fn from_ballots(candidates: &[ActivityId], ballots: &[&RankedBallot]) -> Self {
        let mut ordered: Vec<ActivityId> = Vec::with_capacity(candidates.len());
        let mut index: HashMap<ActivityId, usize> = HashMap::with_capacity(candidates.len());
        for &activity_id in candidates {
            if !index.contains_key(&activity_id) {
                index.insert(activity_id, ordered.len());
                ordered.push(activity_id);
            }
        }
        let n = ordered.len();

        // Each worker fills its own matrix, then the partial matrices are summed.
        let counts = ballots
            .par_iter()
            .fold(
                || vec![vec![0u64; n]; n],
                |mut local, ballot| {
                    add_ballot(&mut local, &index, ballot);
                    local
                },
            )
            .reduce(
                || vec![vec![0u64; n]; n],
                |mut acc, local| {
                    for (acc_row, local_row) in acc.iter_mut().zip(local) {
                        for (a, b) in acc_row.iter_mut().zip(local_row) {
                            *a += b;
                        }
                    }
                    acc
                },
            );

        debug!("Built {}x{} pairwise matrix", n, n);
        Self {
            candidates: ordered,
            index,
            counts,
        }
    }

    pub fn candidates(&self) -> &[ActivityId] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Ballots preferring `a` over `b`. Zero for unknown ids and for `a == b`.
    pub fn count(&self, a: ActivityId, b: ActivityId) -> u64 {
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(&i), Some(&j)) => self.counts[i][j],
            _ => 0,
        }
    }

    pub(crate) fn table(&self) -> &[Vec<u64>] {
        &self.counts
    }

    /// Every ordered pair of distinct candidates, row by row in candidate order.
    pub fn entries(&self) -> Vec<PairwiseEntry> {
        let mut entries = Vec::with_capacity(self.len() * self.len().saturating_sub(1));
        for (i, &winner) in self.candidates.iter().enumerate() {
            for (j, &loser) in self.candidates.iter().enumerate() {
                if i != j {
                    entries.push(PairwiseEntry {
                        winner,
                        loser,
                        count: self.counts[i][j],
                    });
                }
            }
        }
        entries
    }
}

fn add_ballot(counts: &mut [Vec<u64>], index: &HashMap<ActivityId, usize>, ballot: &RankedBallot) {
    let n = counts.len();
    // positions[i] = rank of candidate i on this ballot, None if unranked
    let mut positions: Vec<Option<usize>> = vec![None; n];
    for (position, activity_id) in ballot.activity_ranking.iter().enumerate() {
        if let Some(&i) = index.get(activity_id) {
            if positions[i].is_none() {
                positions[i] = Some(position);
            }
        }
    }

    for i in 0..n {
        let Some(pos_i) = positions[i] else { continue };
        for j in 0..n {
            if i == j {
                continue;
            }
            match positions[j] {
                Some(pos_j) if pos_i < pos_j => counts[i][j] += 1,
                // j unranked: implicit last place
                None => counts[i][j] += 1,
                _ => {}
            }
        }
    }
}

/// (wins, losses) for every row of a square strength table, using strict
/// comparison of `table[i][j]` against `table[j][i]`.
pub(crate) fn wins_and_losses(table: &[Vec<u64>]) -> Vec<(usize, usize)> {
    let n = table.len();
    (0..n)
        .map(|i| {
            let mut wins = 0;
            let mut losses = 0;
            for j in (0..n).filter(|&j| j != i) {
                if table[i][j] > table[j][i] {
                    wins += 1;
                } else if table[i][j] < table[j][i] {
                    losses += 1;
                }
            }
            (wins, losses)
        })
        .collect()
}
