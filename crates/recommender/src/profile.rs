//! Per-user activity preference profiles, derived from ranked ballots.
//!
//! On a ballot of length `L`, the activity at position `p` is worth
//! `(L - p) / L`: the first choice is always 1.0. When a user ranks the same
//! activity on several ballots, the best value is kept.

use std::collections::HashMap;
use vote_store::{ActivityId, Ballot, UserId};

pub type PreferenceProfile = HashMap<ActivityId, f64>;

/// Preference profile of one user. Scored ballots do not contribute.
pub fn preference_profile(user_id: UserId, ballots: &[Ballot]) -> PreferenceProfile {
    let mut profile = PreferenceProfile::new();
    for ballot in ballots.iter().filter_map(Ballot::as_ranked) {
        if ballot.user_id != user_id {
            continue;
        }
        let len = ballot.activity_ranking.len() as f64;
        for (position, &activity_id) in ballot.activity_ranking.iter().enumerate() {
            let value = (len - position as f64) / len;
            profile
                .entry(activity_id)
                .and_modify(|best| *best = best.max(value))
                .or_insert(value);
        }
    }
    profile
}

/// Profiles of every user with at least one ranked ballot.
pub fn preference_profiles(ballots: &[Ballot]) -> HashMap<UserId, PreferenceProfile> {
    let mut profiles: HashMap<UserId, PreferenceProfile> = HashMap::new();
    for ballot in ballots.iter().filter_map(Ballot::as_ranked) {
        profiles
            .entry(ballot.user_id)
            .or_insert_with(|| preference_profile(ballot.user_id, ballots));
    }
    profiles
}
