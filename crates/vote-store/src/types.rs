//! Core domain types for activity voting.
//!
//! This module defines the data shared by every crate in the workspace:
//! - Type aliases for ids (UserId, ActivityId)
//! - Ballots, as a tagged enum with a ranked and a scored case
//! - Submissions, the unvalidated input shape accepted at the boundary
//! - Activities and user profiles provided by the surrounding application

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for an activity (admin-added or provider-listed)
pub type ActivityId = u32;

/// Lowest accepted score on a scored ballot
pub const MIN_SCORE: i64 = 1;

/// Highest accepted score on a scored ballot
pub const MAX_SCORE: i64 = 10;

// =============================================================================
// Ballots
// =============================================================================

/// A ranked ballot: position 0 is the most preferred activity.
///
/// Invariant (enforced by validation): activity ids are unique and there is
/// at least one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedBallot {
    pub user_id: UserId,
    pub activity_ranking: Vec<ActivityId>,
}

impl RankedBallot {
    pub fn new(user_id: UserId, activity_ranking: Vec<ActivityId>) -> Self {
        Self {
            user_id,
            activity_ranking,
        }
    }

    /// Zero-based position of an activity in this ballot, if ranked.
    pub fn position_of(&self, activity_id: ActivityId) -> Option<usize> {
        self.activity_ranking.iter().position(|&id| id == activity_id)
    }
}

/// One stored score for one activity. Scores are within `MIN_SCORE..=MAX_SCORE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredVote {
    pub user_id: UserId,
    pub activity_id: ActivityId,
    pub score: u8,
}

/// A stored ballot.
///
/// Both shapes live in the same store; consumers pick the case they need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ballot {
    Ranked(RankedBallot),
    Scored(ScoredVote),
}

impl Ballot {
    pub fn user_id(&self) -> UserId {
        match self {
            Ballot::Ranked(b) => b.user_id,
            Ballot::Scored(v) => v.user_id,
        }
    }

    pub fn as_ranked(&self) -> Option<&RankedBallot> {
        match self {
            Ballot::Ranked(b) => Some(b),
            Ballot::Scored(_) => None,
        }
    }

    pub fn as_scored(&self) -> Option<&ScoredVote> {
        match self {
            Ballot::Scored(v) => Some(v),
            Ballot::Ranked(_) => None,
        }
    }
}

/// Collect the ranked ballots out of a mixed ballot list.
pub fn ranked_ballots(ballots: &[Ballot]) -> Vec<&RankedBallot> {
    ballots.iter().filter_map(Ballot::as_ranked).collect()
}

/// Collect the scored entries out of a mixed ballot list.
pub fn scored_votes(ballots: &[Ballot]) -> Vec<ScoredVote> {
    ballots.iter().filter_map(Ballot::as_scored).copied().collect()
}

// =============================================================================
// Submissions (unvalidated input)
// =============================================================================

/// A score as received from a caller, before range checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub activity_id: ActivityId,
    pub score: i64,
}

/// Several scores submitted together by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredSubmission {
    pub user_id: UserId,
    pub votes: Vec<ScoreEntry>,
}

/// What a caller hands to the voting service. Validated into `Ballot`s once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Submission {
    Ranked(RankedBallot),
    Scored(ScoredSubmission),
}

impl Submission {
    pub fn user_id(&self) -> UserId {
        match self {
            Submission::Ranked(b) => b.user_id,
            Submission::Scored(s) => s.user_id,
        }
    }

    /// Every activity id referenced by this submission, in submission order.
    pub fn activity_ids(&self) -> Vec<ActivityId> {
        match self {
            Submission::Ranked(b) => b.activity_ranking.clone(),
            Submission::Scored(s) => s.votes.iter().map(|v| v.activity_id).collect(),
        }
    }
}

// =============================================================================
// Activities
// =============================================================================

/// Activity categories, as labelled by the event listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Cultural,
    Sports,
    Community,
    Other,
}

impl ActivityType {
    /// Lowercase label, the text user interests are matched against.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Cultural => "cultural",
            ActivityType::Sports => "sports",
            ActivityType::Community => "community",
            ActivityType::Other => "other",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An activity a user can vote on or be recommended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub location: String,
    pub is_indoor: bool,
    /// ISO date (or date-time) string, as published by the listing
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Users
// =============================================================================

/// Whether a user prefers indoor or outdoor activities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityPreference {
    Indoor,
    Outdoor,
    Either,
}

impl ActivityPreference {
    /// Does an activity with this indoor flag satisfy a non-`Either` preference?
    pub fn matches_indoor(&self, is_indoor: bool) -> bool {
        match self {
            ActivityPreference::Indoor => is_indoor,
            ActivityPreference::Outdoor => !is_indoor,
            ActivityPreference::Either => false,
        }
    }
}

/// A user profile as returned by the user store.
///
/// Every descriptive field is optional; similarity only uses the fields both
/// sides have filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub activity_preference: Option<ActivityPreference>,
}

impl UserProfile {
    /// A profile with only an id; fill the rest with struct update syntax.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            name: String::new(),
            interests: Vec::new(),
            birth_date: None,
            city: None,
            country: None,
            gender: None,
            activity_preference: None,
        }
    }
}
