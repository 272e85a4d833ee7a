//! Add/edit contact form state.
//!
//! The form applies stricter rules than the API: a name of at least three
//! characters and a phone of 10 to 13 plain digits.

use crate::domain::EmailAddress;
use crate::models::{Contact, CreateContactRequest, FieldError};
use once_cell::sync::Lazy;
use regex::Regex;

static FORM_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10,13}$").expect("Invalid phone regex"));

const NAME_MIN_LENGTH: usize = 3;

/// Editable form values plus submission bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Set while a submission is in flight; blocks a second submit
    pub is_submitting: bool,

    /// Set after a rejected submit so the view shows every field error
    pub touched: bool,

    original: Option<Contact>,
}

impl ContactForm {
    /// Empty form for adding a contact.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing contact.
    pub fn for_contact(contact: &Contact) -> Self {
        let mut form = Self {
            original: Some(contact.clone()),
            ..Self::default()
        };
        form.prefill();
        form
    }

    pub fn is_edit_mode(&self) -> bool {
        self.original.is_some()
    }

    fn prefill(&mut self) {
        if let Some(contact) = &self.original {
            self.name = contact.name.clone();
            self.email = contact.email.as_str().to_string();
            self.phone = contact.phone.as_str().to_string();
        }
    }

    /// Field errors for the current values, in name, email, phone order.
    pub fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: &str| {
            errors.push(FieldError {
                field: field.to_string(),
                message: message.to_string(),
            })
        };

        if self.name.is_empty() {
            push("name", "Name is required");
        } else if self.name.chars().count() < NAME_MIN_LENGTH {
            push("name", "Name must be at least 3 characters");
        }

        if self.email.is_empty() {
            push("email", "Email is required");
        } else if EmailAddress::new(self.email.as_str()).is_err() {
            push("email", "Email is not valid");
        }

        if self.phone.is_empty() {
            push("phone", "Phone is required");
        } else if !FORM_PHONE_REGEX.is_match(&self.phone) {
            push("phone", "Phone must be 10-13 digits");
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Start a submission.
    ///
    /// Returns the request body when the form is valid and no submission is
    /// in flight. An invalid form is marked touched instead.
    pub fn submit(&mut self) -> Option<CreateContactRequest> {
        if self.is_submitting {
            return None;
        }
        if !self.is_valid() {
            self.touched = true;
            return None;
        }

        self.is_submitting = true;
        Some(CreateContactRequest::new(
            self.name.clone(),
            self.phone.clone(),
            self.email.clone(),
        ))
    }

    /// Completion callback for a submission, successful or not.
    pub fn complete(&mut self) {
        self.is_submitting = false;
    }

    /// Clear the values, then prefill again in edit mode.
    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.touched = false;
        self.prefill();
    }
}
