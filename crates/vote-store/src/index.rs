//! In-memory index of user profiles and activities.
//!
//! This is the fixture-friendly implementation of the `UserDirectory` and
//! `ActivityCatalog` lookups. The real application plugs its own user store
//! and admin-activity list in through the same traits.

use crate::traits::{ActivityCatalog, UserDirectory};
use crate::types::*;
use std::collections::HashMap;

/// Users and activities keyed by id.
#[derive(Debug, Default, Clone)]
pub struct ProfileIndex {
    pub(crate) users: HashMap<UserId, UserProfile>,
    pub(crate) activities: HashMap<ActivityId, Activity>,
}

impl ProfileIndex {
    /// Creates a new, empty ProfileIndex
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user(&self, id: UserId) -> Option<&UserProfile> {
        self.users.get(&id)
    }

    pub fn get_activity(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.get(&id)
    }

    /// All user ids in ascending order.
    pub fn user_ids_sorted(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.users.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn insert_user(&mut self, user: UserProfile) {
        self.users.insert(user.id, user);
    }

    pub fn insert_activity(&mut self, activity: Activity) {
        self.activities.insert(activity.id, activity);
    }

    /// (users, activities)
    pub fn counts(&self) -> (usize, usize) {
        (self.users.len(), self.activities.len())
    }
}

impl UserDirectory for ProfileIndex {
    fn get_user(&self, id: UserId) -> Option<UserProfile> {
        self.users.get(&id).cloned()
    }

    fn user_ids(&self) -> Vec<UserId> {
        self.user_ids_sorted()
    }
}

impl ActivityCatalog for ProfileIndex {
    fn get_activity(&self, id: ActivityId) -> Option<Activity> {
        self.activities.get(&id).cloned()
    }

    fn activity_exists(&self, id: ActivityId) -> bool {
        self.activities.contains_key(&id)
    }
}
