use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::RegistrationStatus;

/// The current user's per-relationship event-ID sets.
///
/// Toggles are pure reducers: they consume the old state and return the
/// new one. Persisting the change to the backend is the caller's job.
/// "Interested" and "going" are mutually exclusive; favorites are
/// independent of both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipSets {
    pub favorites: HashSet<Uuid>,
    pub interested: HashSet<Uuid>,
    pub going: HashSet<Uuid>,
}

impl MembershipSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the interested/going sets from the backend's registration
    /// rows, leaving favorites to be filled separately.
    pub fn from_registrations(rows: &[(Uuid, RegistrationStatus)]) -> Self {
        let mut sets = Self::default();
        for (event_id, status) in rows {
            match status {
                RegistrationStatus::Interested => {
                    sets.interested.insert(*event_id);
                }
                RegistrationStatus::Registered => {
                    sets.going.insert(*event_id);
                }
            }
        }
        sets
    }

    pub fn toggle_favorite(mut self, event_id: Uuid) -> Self {
        if !self.favorites.remove(&event_id) {
            self.favorites.insert(event_id);
        }
        self
    }

    /// Adding to "interested" removes the event from "going"; removing
    /// leaves "going" untouched.
    pub fn toggle_interested(mut self, event_id: Uuid) -> Self {
        if self.interested.remove(&event_id) {
            return self;
        }
        self.interested.insert(event_id);
        self.going.remove(&event_id);
        self
    }

    /// Symmetric with `toggle_interested`.
    pub fn toggle_going(mut self, event_id: Uuid) -> Self {
        if self.going.remove(&event_id) {
            return self;
        }
        self.going.insert(event_id);
        self.interested.remove(&event_id);
        self
    }

    pub fn is_favorite(&self, event_id: Uuid) -> bool {
        self.favorites.contains(&event_id)
    }

    pub fn is_interested(&self, event_id: Uuid) -> bool {
        self.interested.contains(&event_id)
    }

    pub fn is_going(&self, event_id: Uuid) -> bool {
        self.going.contains(&event_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorite_toggles_on_and_off_independently() {
        let id = Uuid::new_v4();
        let sets = MembershipSets::new().toggle_going(id).toggle_favorite(id);
        assert!(sets.is_favorite(id));
        assert!(sets.is_going(id));

        let sets = sets.toggle_favorite(id);
        assert!(!sets.is_favorite(id));
        assert!(sets.is_going(id));
    }

    #[test]
    fn interested_then_going_never_leaves_both_set() {
        let id = Uuid::new_v4();
        let sets = MembershipSets::new().toggle_interested(id).toggle_going(id);
        assert!(sets.is_going(id));
        assert!(!sets.is_interested(id));
    }

    #[test]
    fn going_then_interested_flips_the_exclusive_pair() {
        let id = Uuid::new_v4();
        let sets = MembershipSets::new().toggle_going(id).toggle_interested(id);
        assert!(sets.is_interested(id));
        assert!(!sets.is_going(id));
    }

    #[test]
    fn removing_does_not_touch_the_sibling_set() {
        let a = Uuid::new_v4();
        let sets = MembershipSets::new()
            .toggle_going(a)
            .toggle_going(a); // off again
        assert!(!sets.is_going(a));
        assert!(!sets.is_interested(a));
    }

    #[test]
    fn registration_rows_split_into_the_right_sets() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let sets = MembershipSets::from_registrations(&[
            (a, RegistrationStatus::Interested),
            (b, RegistrationStatus::Registered),
        ]);
        assert!(sets.is_interested(a));
        assert!(sets.is_going(b));
        assert!(sets.favorites.is_empty());
    }
}
