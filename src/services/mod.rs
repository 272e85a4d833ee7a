//! Application service layer.
//!
//! Services contain business logic and sit between the HTTP handlers and
//! the data access layer.

mod contact_service;

pub use contact_service::{
    ContactService, ContactServiceImpl, NAME_PHONE_EXISTS, PHONE_IN_USE, UPDATE_CONFLICT,
};
