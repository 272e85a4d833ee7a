//! Data models for the contact application.
//!
//! The stored `Contact`, the request bodies that create and patch it, and
//! the response envelope every API call is wrapped in.

pub mod api_response;
pub mod contact;

pub use api_response::{ApiResponse, FieldError};
pub use contact::{
    timestamp_now, Contact, ContactPatch, CreateContactRequest, NewContact, UpdateContactRequest,
};
