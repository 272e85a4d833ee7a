//! Contact service layer.
//!
//! Validation, uniqueness handling and error translation for the contact
//! collection.

use crate::domain::ContactId;
use crate::error::{ContactError, ContactResult, StoreError};
use crate::models::{timestamp_now, Contact, CreateContactRequest, UpdateContactRequest};
use crate::repositories::ContactRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub const PHONE_IN_USE: &str = "Phone number already in use";
pub const NAME_PHONE_EXISTS: &str = "Name and phone combination already exists";
pub const UPDATE_CONFLICT: &str =
    "Data conflict: phone number or name+phone combination already exists";

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Validate and store a new contact.
    async fn create(&self, input: CreateContactRequest) -> ContactResult<Contact>;

    /// All contacts, newest first.
    async fn find_all(&self) -> ContactResult<Vec<Contact>>;

    /// A single contact by ID.
    async fn find_one(&self, id: &str) -> ContactResult<Contact>;

    /// Apply a partial update and refresh `updated_at`.
    async fn update(&self, id: &str, patch: UpdateContactRequest) -> ContactResult<Contact>;

    /// Hard-delete a contact.
    async fn remove(&self, id: &str) -> ContactResult<()>;

    /// Substring search over name, phone and email. A blank query lists everything.
    async fn search(&self, query: &str) -> ContactResult<Vec<Contact>>;
}

/// Default implementation of ContactService.
///
/// The phone pre-check in `create` is an early exit only. Two concurrent
/// creates can both pass it; the store's unique indexes reject the second,
/// and that rejection is reported as a conflict too.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self { repository }
    }

    /// Parse a caller-supplied ID. Blank IDs cannot exist, so they are not found.
    fn parse_id(id: &str) -> ContactResult<ContactId> {
        ContactId::new(id).map_err(|_| ContactError::not_found(id))
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn create(&self, input: CreateContactRequest) -> ContactResult<Contact> {
        let contact = input.validate().map_err(ContactError::Validation)?;

        if self
            .repository
            .find_by_phone(&contact.phone)
            .await?
            .is_some()
        {
            tracing::warn!("Rejected contact create: phone {} in use", contact.phone);
            return Err(ContactError::Conflict(PHONE_IN_USE.to_string()));
        }

        match self.repository.insert(contact).await {
            Ok(created) => {
                tracing::info!("Created contact {}", created.id);
                Ok(created)
            }
            Err(StoreError::UniqueViolation(detail)) => {
                tracing::warn!("Contact insert lost a uniqueness race: {}", detail);
                Err(ContactError::Conflict(NAME_PHONE_EXISTS.to_string()))
            }
            Err(e) => {
                tracing::error!("Failed to insert contact: {}", e);
                Err(e.into())
            }
        }
    }

    async fn find_all(&self) -> ContactResult<Vec<Contact>> {
        Ok(self.repository.list_newest_first().await?)
    }

    async fn find_one(&self, id: &str) -> ContactResult<Contact> {
        let contact_id = Self::parse_id(id)?;

        self.repository
            .find_by_id(&contact_id)
            .await?
            .ok_or_else(|| ContactError::not_found(id))
    }

    async fn update(&self, id: &str, patch: UpdateContactRequest) -> ContactResult<Contact> {
        let contact_id = Self::parse_id(id)?;
        let patch = patch.validate().map_err(ContactError::Validation)?;
        if patch.is_empty() {
            tracing::debug!("Empty patch for contact {}, refreshing updatedAt only", id);
        }

        match self
            .repository
            .update(&contact_id, &patch, timestamp_now())
            .await
        {
            Ok(Some(updated)) => {
                tracing::info!("Updated contact {}", updated.id);
                Ok(updated)
            }
            Ok(None) => Err(ContactError::not_found(id)),
            Err(StoreError::UniqueViolation(detail)) => {
                tracing::warn!("Rejected update of contact {}: {}", id, detail);
                Err(ContactError::Conflict(UPDATE_CONFLICT.to_string()))
            }
            Err(e) => {
                tracing::error!("Failed to update contact {}: {}", id, e);
                Err(e.into())
            }
        }
    }

    async fn remove(&self, id: &str) -> ContactResult<()> {
        let contact_id = Self::parse_id(id)?;

        if !self.repository.delete(&contact_id).await? {
            return Err(ContactError::not_found(id));
        }

        tracing::info!("Deleted contact {}", id);
        Ok(())
    }

    async fn search(&self, query: &str) -> ContactResult<Vec<Contact>> {
        if query.trim().is_empty() {
            return self.find_all().await;
        }

        Ok(self.repository.search(query).await?)
    }
}
