//! User and item catalogue.
//!
//! Thin collaborator around the reservation engine: user accounts, item
//! listings (the sole writer of the `available` flag), item requests,
//! and stored comments. Backed by DashMaps; write-through persistence
//! and startup hydration live in [`crate::db`]. Implements
//! [`lend_booking::PartyDirectory`] so the engine can resolve parties
//! and items against the same records the HTTP layer serves.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use lend_booking::{BookingError, ItemSummary, PartyDirectory};
use uuid::Uuid;

/// A registered user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A shareable item listing. `request_id` links an item listed in
/// answer to another user's item request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A user's request for an item nobody has listed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A review attached to an item after a completed rental.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: Uuid,
    pub item_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Partial item update; `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Duplicate email on user creation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("email {0} is already registered")]
pub struct DuplicateEmail(pub String);

/// Concurrent in-memory catalogue of users, items, requests, and
/// comments.
#[derive(Debug, Default)]
pub struct SharingRegistry {
    users: DashMap<Uuid, UserRecord>,
    items: DashMap<Uuid, ItemRecord>,
    requests: DashMap<Uuid, RequestRecord>,
    comments: DashMap<Uuid, CommentRecord>,
}

impl SharingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user; emails are unique.
    pub fn add_user(&self, name: String, email: String) -> Result<UserRecord, DuplicateEmail> {
        if self
            .users
            .iter()
            .any(|entry| entry.value().email == email)
        {
            return Err(DuplicateEmail(email));
        }
        let record = UserRecord {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: Utc::now(),
        };
        self.users.insert(record.id, record.clone());
        Ok(record)
    }

    pub fn user(&self, id: &Uuid) -> Option<UserRecord> {
        self.users.get(id).map(|entry| entry.value().clone())
    }

    /// All users, oldest first.
    pub fn list_users(&self) -> Vec<UserRecord> {
        let mut users: Vec<UserRecord> = self
            .users
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by_key(|u| u.created_at);
        users
    }

    /// Create an item owned by `owner_id`, optionally answering an item
    /// request. Caller resolves `request_id` beforehand; the registry
    /// stores the link as given.
    pub fn add_item(
        &self,
        owner_id: Uuid,
        name: String,
        description: String,
        available: bool,
        request_id: Option<Uuid>,
    ) -> Result<ItemRecord, BookingError> {
        if !self.users.contains_key(&owner_id) {
            return Err(BookingError::UserNotFound(owner_id));
        }
        let record = ItemRecord {
            id: Uuid::new_v4(),
            owner_id,
            name,
            description,
            available,
            request_id,
            created_at: Utc::now(),
        };
        self.items.insert(record.id, record.clone());
        Ok(record)
    }

    pub fn get_item(&self, id: &Uuid) -> Option<ItemRecord> {
        self.items.get(id).map(|entry| entry.value().clone())
    }

    /// Apply a partial update; only the owner may patch, and blank
    /// strings are ignored rather than stored.
    pub fn update_item(
        &self,
        item_id: &Uuid,
        caller_id: Uuid,
        patch: ItemPatch,
    ) -> Result<ItemRecord, BookingError> {
        let mut entry = self
            .items
            .get_mut(item_id)
            .ok_or(BookingError::ItemNotFound(*item_id))?;
        let item = entry.value_mut();
        if item.owner_id != caller_id {
            return Err(BookingError::NotItemOwner {
                item_id: *item_id,
                user_id: caller_id,
            });
        }
        if let Some(name) = patch.name.filter(|s| !s.trim().is_empty()) {
            item.name = name;
        }
        if let Some(description) = patch.description.filter(|s| !s.trim().is_empty()) {
            item.description = description;
        }
        if let Some(available) = patch.available {
            item.available = available;
        }
        Ok(item.clone())
    }

    /// Items owned by `owner_id`, oldest first.
    pub fn items_of(&self, owner_id: &Uuid) -> Vec<ItemRecord> {
        let mut items: Vec<ItemRecord> = self
            .items
            .iter()
            .filter(|entry| entry.value().owner_id == *owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|i| i.created_at);
        items
    }

    /// File a request for an item. Caller verifies the requester exists.
    pub fn add_request(&self, requester_id: Uuid, description: String) -> RequestRecord {
        let record = RequestRecord {
            id: Uuid::new_v4(),
            requester_id,
            description,
            created_at: Utc::now(),
        };
        self.requests.insert(record.id, record.clone());
        record
    }

    pub fn get_request(&self, id: &Uuid) -> Option<RequestRecord> {
        self.requests.get(id).map(|entry| entry.value().clone())
    }

    /// Requests filed by `requester_id`, oldest first.
    pub fn requests_of(&self, requester_id: &Uuid) -> Vec<RequestRecord> {
        self.collect_requests(|r| r.requester_id == *requester_id)
    }

    /// Requests filed by anyone but `requester_id`, oldest first.
    pub fn requests_excluding(&self, requester_id: &Uuid) -> Vec<RequestRecord> {
        self.collect_requests(|r| r.requester_id != *requester_id)
    }

    fn collect_requests<F>(&self, keep: F) -> Vec<RequestRecord>
    where
        F: Fn(&RequestRecord) -> bool,
    {
        let mut requests: Vec<RequestRecord> = self
            .requests
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        requests.sort_by_key(|r| r.created_at);
        requests
    }

    /// Items listed in answer to `request_id`, oldest first.
    pub fn items_answering(&self, request_id: &Uuid) -> Vec<ItemRecord> {
        let mut items: Vec<ItemRecord> = self
            .items
            .iter()
            .filter(|entry| entry.value().request_id == Some(*request_id))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|i| i.created_at);
        items
    }

    /// Store a gate-approved comment.
    pub fn add_comment(&self, item_id: Uuid, author_id: Uuid, body: String) -> CommentRecord {
        let record = CommentRecord {
            id: Uuid::new_v4(),
            item_id,
            author_id,
            body,
            created_at: Utc::now(),
        };
        self.comments.insert(record.id, record.clone());
        record
    }

    /// Comments for one item, oldest first.
    pub fn comments_for(&self, item_id: &Uuid) -> Vec<CommentRecord> {
        let mut comments: Vec<CommentRecord> = self
            .comments
            .iter()
            .filter(|entry| entry.value().item_id == *item_id)
            .map(|entry| entry.value().clone())
            .collect();
        comments.sort_by_key(|c| c.created_at);
        comments
    }

    // -- Hydration (records loaded from the database at startup) --

    pub fn insert_user(&self, record: UserRecord) {
        self.users.insert(record.id, record);
    }

    pub fn insert_item(&self, record: ItemRecord) {
        self.items.insert(record.id, record);
    }

    pub fn insert_request(&self, record: RequestRecord) {
        self.requests.insert(record.id, record);
    }

    pub fn insert_comment(&self, record: CommentRecord) {
        self.comments.insert(record.id, record);
    }
}

impl PartyDirectory for SharingRegistry {
    fn party_exists(&self, user_id: &Uuid) -> bool {
        self.users.contains_key(user_id)
    }

    fn item(&self, item_id: &Uuid) -> Option<ItemSummary> {
        self.items.get(item_id).map(|entry| {
            let item = entry.value();
            ItemSummary {
                id: item.id,
                owner_id: item.owner_id,
                available: item.available,
            }
        })
    }

    fn items_owned_by(&self, owner_id: &Uuid) -> Vec<Uuid> {
        self.items
            .iter()
            .filter(|entry| entry.value().owner_id == *owner_id)
            .map(|entry| entry.value().id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_email_is_rejected() {
        let registry = SharingRegistry::new();
        registry
            .add_user("a".to_string(), "a@example.com".to_string())
            .unwrap();
        let err = registry
            .add_user("b".to_string(), "a@example.com".to_string())
            .unwrap_err();
        assert_eq!(err, DuplicateEmail("a@example.com".to_string()));
    }

    #[test]
    fn only_the_owner_may_patch_an_item() {
        let registry = SharingRegistry::new();
        let owner = registry
            .add_user("o".to_string(), "o@example.com".to_string())
            .unwrap();
        let other = registry
            .add_user("x".to_string(), "x@example.com".to_string())
            .unwrap();
        let item = registry
            .add_item(owner.id, "drill".to_string(), "hammer drill".to_string(), true, None)
            .unwrap();

        let err = registry
            .update_item(
                &item.id,
                other.id,
                ItemPatch {
                    available: Some(false),
                    ..ItemPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, BookingError::NotItemOwner { .. }));
    }

    #[test]
    fn blank_patch_fields_are_ignored() {
        let registry = SharingRegistry::new();
        let owner = registry
            .add_user("o".to_string(), "o@example.com".to_string())
            .unwrap();
        let item = registry
            .add_item(owner.id, "drill".to_string(), "hammer drill".to_string(), true, None)
            .unwrap();

        let updated = registry
            .update_item(
                &item.id,
                owner.id,
                ItemPatch {
                    name: Some("  ".to_string()),
                    description: Some("heavier drill".to_string()),
                    available: Some(false),
                },
            )
            .unwrap();
        assert_eq!(updated.name, "drill");
        assert_eq!(updated.description, "heavier drill");
        assert!(!updated.available);
    }

    #[test]
    fn requests_split_by_requester_and_collect_answers() {
        let registry = SharingRegistry::new();
        let requester = registry
            .add_user("r".to_string(), "r@example.com".to_string())
            .unwrap();
        let owner = registry
            .add_user("o".to_string(), "o@example.com".to_string())
            .unwrap();

        let request = registry.add_request(requester.id, "need a kayak".to_string());
        registry.add_request(owner.id, "need a tent".to_string());

        assert_eq!(registry.requests_of(&requester.id).len(), 1);
        let others = registry.requests_excluding(&requester.id);
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].requester_id, owner.id);

        let item = registry
            .add_item(
                owner.id,
                "kayak".to_string(),
                "sea kayak".to_string(),
                true,
                Some(request.id),
            )
            .unwrap();
        let answers = registry.items_answering(&request.id);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].id, item.id);
        assert!(registry.items_answering(&item.id).is_empty());
    }

    #[test]
    fn directory_view_tracks_the_catalogue() {
        let registry = SharingRegistry::new();
        let owner = registry
            .add_user("o".to_string(), "o@example.com".to_string())
            .unwrap();
        let item = registry
            .add_item(owner.id, "kayak".to_string(), "two-seat".to_string(), true, None)
            .unwrap();

        assert!(registry.party_exists(&owner.id));
        let summary = PartyDirectory::item(&registry, &item.id).unwrap();
        assert_eq!(summary.owner_id, owner.id);
        assert_eq!(registry.items_owned_by(&owner.id), vec![item.id]);
    }
}
