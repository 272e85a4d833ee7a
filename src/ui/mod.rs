//! Contact list UI logic, independent of any rendering toolkit.
//!
//! - **state**: list state, pagination and the list reducers
//! - **controller**: drives the contact client and updates the state
//! - **debounce**: search input debouncing
//! - **form**: add/edit form validation and submit guard
//! - **notice**: user-facing messages and date formatting

mod controller;
mod debounce;
mod form;
mod notice;
mod state;

pub use controller::{
    ContactListController, ADD_FAILED, CONTACT_ADDED, CONTACT_DELETED, CONTACT_UPDATED,
    DELETE_FAILED, SEARCH_OFFLINE, UPDATE_FAILED,
};
pub use debounce::SearchDebouncer;
pub use form::ContactForm;
pub use notice::{format_date, Notice, NoticeKind};
pub use state::{
    apply_created, apply_deleted, apply_updated, local_filter, ContactListState, LOAD_FAILED,
};
