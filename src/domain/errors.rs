//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
///
/// Each variant belongs to exactly one contact field so that the HTTP layer
/// can report failures per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The contact name is empty or whitespace-only.
    EmptyName,

    /// The phone number is empty.
    EmptyPhone,

    /// The provided phone number is invalid.
    InvalidPhone(String),

    /// The email address is empty.
    EmptyEmail,

    /// The provided email address is invalid.
    InvalidEmail(String),
}

impl ValidationError {
    /// Name of the contact field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId => "id",
            Self::EmptyName => "name",
            Self::EmptyPhone | Self::InvalidPhone(_) => "phone",
            Self::EmptyEmail | Self::InvalidEmail(_) => "email",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::EmptyPhone => write!(f, "Phone number cannot be empty"),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number: {}", phone),
            Self::EmptyEmail => write!(f, "Email cannot be empty"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
        }
    }
}

impl std::error::Error for ValidationError {}
