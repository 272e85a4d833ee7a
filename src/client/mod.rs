//! HTTP client for the contact API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. Every call returns the decoded response envelope;
//! non-2xx responses are decoded from the error envelope into typed `ClientError`s.

mod async_wrapper;
pub use async_wrapper::{AsyncContactClient, AsyncContactClientImpl};

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{ApiResponse, Contact, CreateContactRequest, UpdateContactRequest};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the contact API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct ContactClient {
    /// Base URL of the contact API
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ContactClient {
    /// Create a new ContactClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a ContactClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self::build(base_url, Duration::from_secs(10))
    }

    fn build(base_url: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn finish<T>(timer: HttpTimer, result: &ClientResult<T>) {
        match result {
            Ok(_) => timer.complete(),
            Err(_) => timer.complete_with_error(),
        }
    }

    fn get(&self, path: &str) -> ClientResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);
        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        Self::finish(timer, &result);
        result
    }

    fn post(&self, path: &str, body: &serde_json::Value) -> ClientResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);
        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        if let Err(e) = &result {
            tracing::warn!("POST {} - Error: {}", url, e);
        }
        Self::finish(timer, &result);
        result
    }

    fn patch(&self, path: &str, body: &serde_json::Value) -> ClientResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);
        tracing::debug!("PATCH {}", url);

        let result = self
            .agent
            .request("PATCH", &url)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        if let Err(e) = &result {
            tracing::warn!("PATCH {} - Error: {}", url, e);
        }
        Self::finish(timer, &result);
        result
    }

    fn delete(&self, path: &str) -> ClientResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);
        tracing::debug!("DELETE {}", url);

        let result = self
            .agent
            .delete(&url)
            .call()
            .map_err(|e| self.map_error(e));

        Self::finish(timer, &result);
        result
    }

    /// Map a ureq error to a ClientError.
    ///
    /// Status errors are decoded from the error envelope when the body is one,
    /// falling back to the raw body text.
    fn map_error(&self, error: ureq::Error) -> ClientError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                let (message, errors) =
                    match serde_json::from_str::<ApiResponse<serde_json::Value>>(&body) {
                        Ok(envelope) => (envelope.message, envelope.errors.unwrap_or_default()),
                        Err(_) => (body, Vec::new()),
                    };

                match code {
                    400 => ClientError::Validation { message, errors },
                    404 => ClientError::NotFound(message),
                    409 => ClientError::Conflict(message),
                    _ => ClientError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ClientError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    ClientError::Timeout
                } else {
                    ClientError::HttpError(transport.to_string())
                }
            }
        }
    }

    fn read_envelope<T: DeserializeOwned>(
        response: ureq::Response,
    ) -> ClientResult<ApiResponse<T>> {
        let body = response
            .into_string()
            .map_err(|e| ClientError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(ClientError::JsonError)
    }

    fn contact_path(id: &str) -> String {
        format!("/contacts/{}", urlencoding::encode(id))
    }

    /// Fetch every contact, newest first.
    pub fn get_contacts(&self) -> ClientResult<ApiResponse<Vec<Contact>>> {
        let response = self.get("/contacts")?;
        let envelope: ApiResponse<Vec<Contact>> = Self::read_envelope(response)?;

        if let Some(contacts) = &envelope.data {
            self.metrics.record_contacts_fetched(contacts.len());
        }
        Ok(envelope)
    }

    /// Search contacts by name, phone or email.
    pub fn search_contacts(&self, query: &str) -> ClientResult<ApiResponse<Vec<Contact>>> {
        let path = format!("/contacts/search?q={}", urlencoding::encode(query));
        let response = self.get(&path)?;
        let envelope: ApiResponse<Vec<Contact>> = Self::read_envelope(response)?;

        if let Some(contacts) = &envelope.data {
            self.metrics.record_contacts_fetched(contacts.len());
        }
        Ok(envelope)
    }

    /// Get a single contact by ID.
    pub fn get_contact(&self, id: &str) -> ClientResult<ApiResponse<Contact>> {
        let response = self.get(&Self::contact_path(id))?;
        let envelope: ApiResponse<Contact> = Self::read_envelope(response)?;

        if envelope.data.is_some() {
            self.metrics.record_contacts_fetched(1);
        }
        Ok(envelope)
    }

    /// Create a new contact.
    pub fn create_contact(
        &self,
        request: &CreateContactRequest,
    ) -> ClientResult<ApiResponse<Contact>> {
        tracing::info!("Creating contact: {}", request.name);

        let body = serde_json::to_value(request).map_err(ClientError::JsonError)?;
        let response = self.post("/contacts", &body)?;
        let envelope = Self::read_envelope(response)?;
        self.metrics.record_contact_written();
        Ok(envelope)
    }

    /// Apply a partial update to a contact.
    pub fn update_contact(
        &self,
        id: &str,
        request: &UpdateContactRequest,
    ) -> ClientResult<ApiResponse<Contact>> {
        let body = serde_json::to_value(request).map_err(ClientError::JsonError)?;
        let response = self.patch(&Self::contact_path(id), &body)?;
        let envelope = Self::read_envelope(response)?;
        self.metrics.record_contact_written();
        Ok(envelope)
    }

    /// Delete a contact.
    pub fn delete_contact(&self, id: &str) -> ClientResult<ApiResponse<()>> {
        let response = self.delete(&Self::contact_path(id))?;
        let envelope = Self::read_envelope(response)?;
        self.metrics.record_contact_written();
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = ContactClient::with_base_url("http://localhost:3000".to_string());

        assert_eq!(
            client.build_url("/contacts"),
            "http://localhost:3000/contacts"
        );
        assert_eq!(client.build_url("contacts"), "http://localhost:3000/contacts");

        let client_with_slash = ContactClient::with_base_url("http://localhost:3000/".to_string());
        assert_eq!(
            client_with_slash.build_url("/contacts"),
            "http://localhost:3000/contacts"
        );
    }

    #[test]
    fn test_contact_path_encodes_id() {
        assert_eq!(ContactClient::contact_path("abc"), "/contacts/abc");
        assert_eq!(ContactClient::contact_path("a b/c"), "/contacts/a%20b%2Fc");
    }

    #[test]
    fn test_client_creation() {
        let config = Config {
            api_base_url: "http://contacts.internal:8080".to_string(),
            request_timeout: 3,
            ..Config::default()
        };

        let client = ContactClient::new(&config);
        assert_eq!(client.base_url, "http://contacts.internal:8080");
        assert_eq!(client.metrics().http_requests_total(), 0);
    }
}
