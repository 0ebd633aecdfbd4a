//! The in-memory ballot store.
//!
//! The store is the only shared mutable state of the voting core. Writers
//! (append, reset) take the write half of an `RwLock`, so they are serialized
//! and a batch is appended in one step. Readers take the read half and get an
//! owned copy back, so nothing handed out can reach the stored ballots.

use crate::types::*;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Holds every submitted ballot in insertion order.
///
/// Share it between request handlers as `Arc<BallotStore>`.
#[derive(Debug, Default)]
pub struct BallotStore {
    ballots: RwLock<Vec<Ballot>>,
}

impl BallotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-filled with ballots (e.g. from a seed snapshot).
    pub fn from_ballots(ballots: Vec<Ballot>) -> Self {
        Self {
            ballots: RwLock::new(ballots),
        }
    }

    // Writes are single push/extend/clear calls, so a poisoned Vec is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Ballot>> {
        self.ballots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Ballot>> {
        self.ballots.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append one ballot. The store keeps its own copy.
    pub fn add_ballot(&self, ballot: &Ballot) {
        let mut ballots = self.write();
        ballots.push(ballot.clone());
        debug!("Stored ballot from user {} (total: {})", ballot.user_id(), ballots.len());
    }

    /// Append a batch under a single write lock: readers see all of it or none.
    pub fn add_ballots(&self, batch: &[Ballot]) {
        let mut ballots = self.write();
        ballots.extend_from_slice(batch);
        debug!("Stored batch of {} ballots (total: {})", batch.len(), ballots.len());
    }

    /// Copy of every ballot, in insertion order.
    pub fn list_ballots(&self) -> Vec<Ballot> {
        self.read().clone()
    }

    /// Every scored entry for an activity, in insertion order.
    pub fn votes_for_activity(&self, activity_id: ActivityId) -> Vec<ScoredVote> {
        self.read()
            .iter()
            .filter_map(Ballot::as_scored)
            .filter(|vote| vote.activity_id == activity_id)
            .copied()
            .collect()
    }

    /// Every ballot (both shapes) submitted by a user, in insertion order.
    pub fn ballots_for_user(&self, user_id: UserId) -> Vec<Ballot> {
        self.read()
            .iter()
            .filter(|ballot| ballot.user_id() == user_id)
            .cloned()
            .collect()
    }

    /// Remove every ballot. Calling it on an empty store is a no-op.
    pub fn reset_all(&self) {
        let mut ballots = self.write();
        let removed = ballots.len();
        ballots.clear();
        info!("Ballot store reset ({} ballots removed)", removed);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
