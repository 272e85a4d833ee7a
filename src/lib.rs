//! Contact App - a contact book REST API with its client and list UI logic.
//!
//! The backend stores contacts in SQLite and serves create, read, update,
//! delete and search over HTTP. The client and UI modules hold the logic of
//! the single-page frontend that consumes it.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (IDs, phone numbers, emails)
//! - **models**: The contact record, request bodies and the response envelope
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Contact store trait and its SQLite implementation
//! - **services**: Validation, uniqueness and error translation
//! - **server**: HTTP routes and response mapping
//! - **client**: HTTP client for the contact API
//! - **metrics**: Client request counters
//! - **ui**: Contact list state, search debouncing, forms and notices

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod ui;

// Re-export commonly used types
pub use client::{AsyncContactClient, AsyncContactClientImpl, ContactClient};
pub use config::Config;
pub use error::{ClientError, ConfigError, ContactError, StoreError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{ApiResponse, Contact, CreateContactRequest, UpdateContactRequest};
pub use repositories::{ContactRepository, SqliteContactRepository};
pub use services::{ContactService, ContactServiceImpl};
pub use ui::{ContactListController, ContactListState};
