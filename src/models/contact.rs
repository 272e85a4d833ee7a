//! Contact model and the request shapes that create or patch it.

use crate::domain::{ContactId, EmailAddress, PhoneNumber, ValidationError};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Current time at the precision the store keeps (microseconds).
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A stored contact.
///
/// The wire form mirrors the document store the API was first written
/// against: the identifier travels as `_id` and timestamps are camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Store-assigned identifier, immutable for the life of the record
    #[serde(rename = "_id", alias = "id")]
    pub id: ContactId,

    /// Display name
    pub name: String,

    /// Phone number, unique across all contacts
    pub phone: PhoneNumber,

    /// Email address
    pub email: EmailAddress,

    /// When the contact was created
    pub created_at: DateTime<Utc>,

    /// When the contact was last written
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Case-insensitive substring match over name, phone and email.
    ///
    /// The store filters search results with this predicate. Both sides are
    /// folded with Unicode lowercasing and the query is treated as literal
    /// text.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.phone.as_str().to_lowercase().contains(&query)
            || self.email.as_str().to_lowercase().contains(&query)
    }
}

/// A validated contact that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub phone: PhoneNumber,
    pub email: EmailAddress,
}

/// A validated partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<PhoneNumber>,
    pub email: Option<EmailAddress>,
}

impl ContactPatch {
    /// True when the patch carries no field changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none()
    }

    /// Apply the present fields and stamp `updated_at`.
    pub fn apply_to(&self, contact: &mut Contact, updated_at: DateTime<Utc>) {
        if let Some(name) = &self.name {
            contact.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            contact.phone = phone.clone();
        }
        if let Some(email) = &self.email {
            contact.email = email.clone();
        }
        contact.updated_at = updated_at;
    }
}

/// Request body for creating a contact.
///
/// Fields are plain strings so that missing or malformed values surface as
/// per-field validation errors instead of a body parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreateContactRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl CreateContactRequest {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> Result<NewContact, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = validate_name(&self.name).map_err(|e| errors.push(e)).ok();
        let phone = PhoneNumber::new(self.phone.as_str())
            .map_err(|e| errors.push(e))
            .ok();
        let email = EmailAddress::new(self.email.as_str())
            .map_err(|e| errors.push(e))
            .ok();

        match (name, phone, email) {
            (Some(name), Some(phone), Some(email)) => Ok(NewContact { name, phone, email }),
            _ => Err(errors),
        }
    }
}

/// Request body for patching a contact. Absent fields are not changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpdateContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UpdateContactRequest {
    /// Validate the fields that are present, collecting all failures.
    pub fn validate(&self) -> Result<ContactPatch, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut patch = ContactPatch::default();

        if let Some(name) = &self.name {
            match validate_name(name) {
                Ok(name) => patch.name = Some(name),
                Err(e) => errors.push(e),
            }
        }
        if let Some(phone) = &self.phone {
            match PhoneNumber::new(phone.as_str()) {
                Ok(phone) => patch.phone = Some(phone),
                Err(e) => errors.push(e),
            }
        }
        if let Some(email) = &self.email {
            match EmailAddress::new(email.as_str()) {
                Ok(email) => patch.email = Some(email),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

impl From<CreateContactRequest> for UpdateContactRequest {
    fn from(request: CreateContactRequest) -> Self {
        Self {
            name: Some(request.name),
            phone: Some(request.phone),
            email: Some(request.email),
        }
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}
