//! Lookup capabilities the voting core needs from the surrounding application.
//!
//! The user profile store and the activity catalog live outside this
//! workspace. They are reached through these traits so the ranking and
//! recommendation code can be driven by fixture collections in tests.

use crate::types::{Activity, ActivityId, UserId, UserProfile};

/// Read-only access to user profiles.
///
/// `Send + Sync` lets one directory be shared by concurrent requests.
pub trait UserDirectory: Send + Sync {
    /// Look a user up by id. `None` means not found.
    fn get_user(&self, id: UserId) -> Option<UserProfile>;

    /// Ids of every known user, the pool similar users are drawn from.
    fn user_ids(&self) -> Vec<UserId>;
}

/// Read-only access to the activities votes may reference.
pub trait ActivityCatalog: Send + Sync {
    fn get_activity(&self, id: ActivityId) -> Option<Activity>;

    fn activity_exists(&self, id: ActivityId) -> bool {
        self.get_activity(id).is_some()
    }
}
