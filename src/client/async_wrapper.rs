//! Async wrapper around the synchronous ContactClient.
//!
//! This module provides an async interface to the synchronous ContactClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::ContactClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{ApiResponse, Contact, CreateContactRequest, UpdateContactRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Async contact API operations.
///
/// This is the seam the list controller talks to, so tests can swap in an
/// in-memory implementation.
#[async_trait]
pub trait AsyncContactClient: Send + Sync {
    async fn get_contacts(&self) -> ClientResult<ApiResponse<Vec<Contact>>>;
    async fn search_contacts(&self, query: &str) -> ClientResult<ApiResponse<Vec<Contact>>>;
    async fn get_contact(&self, id: &str) -> ClientResult<ApiResponse<Contact>>;

    async fn create_contact(
        &self,
        request: &CreateContactRequest,
    ) -> ClientResult<ApiResponse<Contact>>;
    async fn update_contact(
        &self,
        id: &str,
        request: &UpdateContactRequest,
    ) -> ClientResult<ApiResponse<Contact>>;
    async fn delete_contact(&self, id: &str) -> ClientResult<ApiResponse<()>>;
}

/// Async wrapper around the synchronous ContactClient.
#[derive(Clone)]
pub struct AsyncContactClientImpl {
    client: Arc<ContactClient>,
}

impl AsyncContactClientImpl {
    pub fn new(client: ContactClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// The wrapped synchronous client.
    pub fn inner(&self) -> &ContactClient {
        &self.client
    }
}

fn join_error(e: tokio::task::JoinError) -> ClientError {
    ClientError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncContactClient for AsyncContactClientImpl {
    async fn get_contacts(&self) -> ClientResult<ApiResponse<Vec<Contact>>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.get_contacts())
            .await
            .map_err(join_error)?
    }

    async fn search_contacts(&self, query: &str) -> ClientResult<ApiResponse<Vec<Contact>>> {
        let client = self.client.clone();
        let query = query.to_string();

        tokio::task::spawn_blocking(move || client.search_contacts(&query))
            .await
            .map_err(join_error)?
    }

    async fn get_contact(&self, id: &str) -> ClientResult<ApiResponse<Contact>> {
        let client = self.client.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || client.get_contact(&id))
            .await
            .map_err(join_error)?
    }

    async fn create_contact(
        &self,
        request: &CreateContactRequest,
    ) -> ClientResult<ApiResponse<Contact>> {
        let client = self.client.clone();
        let request = request.clone();

        tokio::task::spawn_blocking(move || client.create_contact(&request))
            .await
            .map_err(join_error)?
    }

    async fn update_contact(
        &self,
        id: &str,
        request: &UpdateContactRequest,
    ) -> ClientResult<ApiResponse<Contact>> {
        let client = self.client.clone();
        let id = id.to_string();
        let request = request.clone();

        tokio::task::spawn_blocking(move || client.update_contact(&id, &request))
            .await
            .map_err(join_error)?
    }

    async fn delete_contact(&self, id: &str) -> ClientResult<ApiResponse<()>> {
        let client = self.client.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || client.delete_contact(&id))
            .await
            .map_err(join_error)?
    }
}
