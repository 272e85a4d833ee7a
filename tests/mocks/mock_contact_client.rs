use async_trait::async_trait;
use contact_app::client::AsyncContactClient;
use contact_app::domain::ContactId;
use contact_app::error::{ClientError, ClientResult};
use contact_app::models::{
    timestamp_now, ApiResponse, Contact, CreateContactRequest, FieldError, UpdateContactRequest,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the contact API.
///
/// Behaves like the real API for the happy path, records every search
/// query, and can be told to fail any operation by name (for example
/// `"search_contacts"`) with a transport error.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContactClient {
    contacts: Arc<Mutex<Vec<Contact>>>,
    searches: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockContactClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed contacts, newest first.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let client = Self::new();
        *client.contacts.lock().unwrap() = contacts;
        client
    }

    /// Make every call to `operation` fail until `recover` is called.
    pub fn fail(&self, operation: &str) {
        self.failing.lock().unwrap().insert(operation.to_string());
    }

    pub fn recover(&self, operation: &str) {
        self.failing.lock().unwrap().remove(operation);
    }

    /// Queries sent to `search_contacts`, in order.
    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn begin(&self, method: &str) -> ClientResult<()> {
        *self
            .call_counts
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_insert(0) += 1;

        if self.failing.lock().unwrap().contains(method) {
            return Err(ClientError::HttpError("Connection failed".to_string()));
        }
        Ok(())
    }

    fn invalid(errors: Vec<contact_app::domain::ValidationError>) -> ClientError {
        ClientError::Validation {
            message: "Validation failed".to_string(),
            errors: errors.iter().map(FieldError::from).collect(),
        }
    }
}

#[async_trait]
impl AsyncContactClient for MockContactClient {
    async fn get_contacts(&self) -> ClientResult<ApiResponse<Vec<Contact>>> {
        self.begin("get_contacts")?;

        let contacts = self.contacts.lock().unwrap().clone();
        Ok(ApiResponse::success("Contacts retrieved successfully", contacts))
    }

    async fn search_contacts(&self, query: &str) -> ClientResult<ApiResponse<Vec<Contact>>> {
        self.searches.lock().unwrap().push(query.to_string());
        self.begin("search_contacts")?;

        let contacts = self.contacts.lock().unwrap();
        let results = contacts
            .iter()
            .filter(|c| c.matches_query(query))
            .cloned()
            .collect();
        Ok(ApiResponse::success(
            "Search results retrieved successfully",
            results,
        ))
    }

    async fn get_contact(&self, id: &str) -> ClientResult<ApiResponse<Contact>> {
        self.begin("get_contact")?;

        let contacts = self.contacts.lock().unwrap();
        contacts
            .iter()
            .find(|c| c.id.as_str() == id)
            .cloned()
            .map(|c| ApiResponse::success("Contact found", c))
            .ok_or_else(|| ClientError::NotFound(format!("Contact with ID {} not found", id)))
    }

    async fn create_contact(
        &self,
        request: &CreateContactRequest,
    ) -> ClientResult<ApiResponse<Contact>> {
        self.begin("create_contact")?;

        let new = request.validate().map_err(Self::invalid)?;
        let mut contacts = self.contacts.lock().unwrap();
        if contacts.iter().any(|c| c.phone == new.phone) {
            return Err(ClientError::Conflict(
                "Phone number already in use".to_string(),
            ));
        }

        let now = timestamp_now();
        let contact = Contact {
            id: ContactId::generate(),
            name: new.name,
            phone: new.phone,
            email: new.email,
            created_at: now,
            updated_at: now,
        };
        contacts.insert(0, contact.clone());
        Ok(ApiResponse::success("Contact created successfully", contact))
    }

    async fn update_contact(
        &self,
        id: &str,
        request: &UpdateContactRequest,
    ) -> ClientResult<ApiResponse<Contact>> {
        self.begin("update_contact")?;

        let patch = request.validate().map_err(Self::invalid)?;
        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts
            .iter_mut()
            .find(|c| c.id.as_str() == id)
            .ok_or_else(|| ClientError::NotFound(format!("Contact with ID {} not found", id)))?;

        patch.apply_to(contact, timestamp_now());
        Ok(ApiResponse::success(
            "Contact updated successfully",
            contact.clone(),
        ))
    }

    async fn delete_contact(&self, id: &str) -> ClientResult<ApiResponse<()>> {
        self.begin("delete_contact")?;

        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|c| c.id.as_str() != id);
        if contacts.len() == before {
            return Err(ClientError::NotFound(format!(
                "Contact with ID {} not found",
                id
            )));
        }
        Ok(ApiResponse::empty("Contact deleted successfully"))
    }
}
