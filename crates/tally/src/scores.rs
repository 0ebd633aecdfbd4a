//! Average-score aggregation over scored ballots.
//!
//! Averages are rounded to two decimals, ties to even (8.125 becomes 8.12).
//! An activity with no scored entries
//! reports an average of 0 and a count of 0; 0 never occurs as a real average
//! since the lowest accepted score is 1.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use vote_store::{ActivityId, ScoredVote};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityScore {
    pub activity_id: ActivityId,
    pub average_score: f64,
    pub vote_count: usize,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn average(sum: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        round2(sum as f64 / count as f64)
    }
}

/// Average score of a single activity.
pub fn activity_score(activity_id: ActivityId, votes: &[ScoredVote]) -> ActivityScore {
    let (sum, vote_count) = votes
        .iter()
        .filter(|v| v.activity_id == activity_id)
        .fold((0u64, 0usize), |(sum, count), v| {
            (sum + u64::from(v.score), count + 1)
        });
    ActivityScore {
        activity_id,
        average_score: average(sum, vote_count),
        vote_count,
    }
}

/// Every scored activity, highest average first.
///
/// `vote_count` does not take part in the ordering. Equal averages keep the
/// order in which the activities first appear in `votes`.
pub fn score_ranking(votes: &[ScoredVote]) -> Vec<ActivityScore> {
    let mut order: Vec<ActivityId> = Vec::new();
    let mut totals: HashMap<ActivityId, (u64, usize)> = HashMap::new();
    for vote in votes {
        let entry = totals.entry(vote.activity_id).or_insert_with(|| {
            order.push(vote.activity_id);
            (0, 0)
        });
        entry.0 += u64::from(vote.score);
        entry.1 += 1;
    }

    let mut ranking: Vec<ActivityScore> = order
        .into_iter()
        .map(|activity_id| {
            let (sum, vote_count) = totals[&activity_id];
            ActivityScore {
                activity_id,
                average_score: average(sum, vote_count),
                vote_count,
            }
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(Ordering::Equal)
    });
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(user_id: u32, activity_id: ActivityId, score: u8) -> ScoredVote {
        ScoredVote {
            user_id,
            activity_id,
            score,
        }
    }

    #[test]
    fn test_activity_score_rounds_to_two_decimals() {
        let votes = vec![vote(1, 5, 7), vote(2, 5, 8), vote(3, 5, 8), vote(4, 6, 1)];
        let score = activity_score(5, &votes);
        assert_eq!(score.average_score, 7.67);
        assert_eq!(score.vote_count, 3);
    }

    #[test]
    fn test_halfway_average_rounds_to_even() {
        // 65 / 8 = 8.125
        let votes: Vec<ScoredVote> = [9, 9, 8, 8, 8, 8, 8, 7]
            .iter()
            .enumerate()
            .map(|(user, &score)| vote(user as u32, 3, score))
            .collect();
        assert_eq!(activity_score(3, &votes).average_score, 8.12);

        // 61 / 8 = 7.625
        let votes: Vec<ScoredVote> = [9, 8, 8, 8, 7, 7, 7, 7]
            .iter()
            .enumerate()
            .map(|(user, &score)| vote(user as u32, 4, score))
            .collect();
        assert_eq!(activity_score(4, &votes).average_score, 7.62);
    }

    #[test]
    fn test_activity_without_votes() {
        let score = activity_score(42, &[vote(1, 5, 7)]);
        assert_eq!(score.average_score, 0.0);
        assert_eq!(score.vote_count, 0);
    }

    #[test]
    fn test_ranking_ignores_vote_count() {
        // 2: one vote of 9; 1: three votes averaging 8
        let votes = vec![
            vote(1, 1, 8),
            vote(2, 1, 8),
            vote(3, 1, 8),
            vote(4, 2, 9),
        ];
        let ranking = score_ranking(&votes);
        let order: Vec<ActivityId> = ranking.iter().map(|s| s.activity_id).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(ranking[1].vote_count, 3);
    }

    #[test]
    fn test_ranking_ties_keep_first_appearance() {
        let votes = vec![vote(1, 9, 5), vote(1, 4, 5), vote(2, 7, 6)];
        let order: Vec<ActivityId> = score_ranking(&votes).iter().map(|s| s.activity_id).collect();
        assert_eq!(order, vec![7, 9, 4]);
    }

    #[test]
    fn test_empty_ranking() {
        assert!(score_ranking(&[]).is_empty());
    }
}
