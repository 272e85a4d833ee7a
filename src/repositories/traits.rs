use crate::domain::{ContactId, PhoneNumber};
use crate::error::StoreResult;
use crate::models::{Contact, ContactPatch, NewContact};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage so the service can run against
/// SQLite in production and an in-memory double in tests. Implementations
/// must enforce uniqueness of `phone` and of `(name, phone)` themselves and
/// report a rejected write as `StoreError::UniqueViolation`.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve a single contact by ID.
    async fn find_by_id(&self, id: &ContactId) -> StoreResult<Option<Contact>>;

    /// Retrieve the contact holding a phone number, if any.
    async fn find_by_phone(&self, phone: &PhoneNumber) -> StoreResult<Option<Contact>>;

    /// All contacts, newest `created_at` first.
    async fn list_newest_first(&self) -> StoreResult<Vec<Contact>>;

    /// Contacts whose name, phone or email contains `query`, ignoring case.
    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>>;

    /// Persist a new contact, assigning its ID and timestamps.
    async fn insert(&self, contact: NewContact) -> StoreResult<Contact>;

    /// Apply a patch. Returns `None` when no contact has the ID.
    async fn update(
        &self,
        id: &ContactId,
        patch: &ContactPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Contact>>;

    /// Hard-delete a contact. Returns `false` when no contact has the ID.
    async fn delete(&self, id: &ContactId) -> StoreResult<bool>;
}
