//! Domain value objects and types.
//!
//! Type-safe wrappers for contact IDs, email addresses, and phone numbers.
//! Each validates at construction time so invalid data cannot be
//! represented past the request boundary.

pub mod contact_id;
pub mod email;
pub mod errors;
pub mod phone;

pub use contact_id::ContactId;
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::PhoneNumber;
