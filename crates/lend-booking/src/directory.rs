//! Party and item resolution boundary.
//!
//! User accounts and item listings live outside the reservation engine.
//! The engine only ever asks three questions, captured by
//! [`PartyDirectory`]: does this user exist, what are the owner and
//! availability of this item, and which items does this user own.

use dashmap::DashMap;
use uuid::Uuid;

/// The slice of an item the reservation engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSummary {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Owner-controlled flag; the engine reads it and never writes it.
    pub available: bool,
}

/// Resolves users and items for the reservation engine.
pub trait PartyDirectory: Send + Sync {
    /// Does a user with this id exist?
    fn party_exists(&self, user_id: &Uuid) -> bool;

    /// Owner and availability of an item, or `None` if it does not exist.
    fn item(&self, item_id: &Uuid) -> Option<ItemSummary>;

    /// Ids of all items owned by `owner_id`.
    fn items_owned_by(&self, owner_id: &Uuid) -> Vec<Uuid>;
}

/// Map-backed directory, used as the test double for the engine.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: DashMap<Uuid, ()>,
    items: DashMap<Uuid, ItemSummary>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user and return its id.
    pub fn add_user(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.users.insert(id, ());
        id
    }

    /// Register an item for `owner_id` and return its id.
    pub fn add_item(&self, owner_id: Uuid, available: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(
            id,
            ItemSummary {
                id,
                owner_id,
                available,
            },
        );
        id
    }

    /// Flip an item's availability flag.
    pub fn set_available(&self, item_id: &Uuid, available: bool) {
        if let Some(mut entry) = self.items.get_mut(item_id) {
            entry.value_mut().available = available;
        }
    }
}

impl PartyDirectory for InMemoryDirectory {
    fn party_exists(&self, user_id: &Uuid) -> bool {
        self.users.contains_key(user_id)
    }

    fn item(&self, item_id: &Uuid) -> Option<ItemSummary> {
        self.items.get(item_id).map(|entry| *entry.value())
    }

    fn items_owned_by(&self, owner_id: &Uuid) -> Vec<Uuid> {
        self.items
            .iter()
            .filter(|entry| entry.value().owner_id == *owner_id)
            .map(|entry| entry.value().id)
            .collect()
    }
}
