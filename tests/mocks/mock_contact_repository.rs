use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contact_app::domain::{ContactId, PhoneNumber};
use contact_app::error::{StoreError, StoreResult};
use contact_app::models::{timestamp_now, Contact, ContactPatch, NewContact};
use contact_app::repositories::ContactRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Keeps contacts in insertion order, enforces the same unique constraints
/// as the SQLite store, and tracks method calls for verification. Failures
/// can be injected to exercise the service's error translation.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    next_failure: Arc<Mutex<Option<StoreError>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            next_failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a contact directly, bypassing constraints.
    pub fn add_contact(&self, contact: Contact) {
        self.contacts.lock().unwrap().push(contact);
    }

    /// Snapshot of the stored contacts in insertion order.
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Make the next write (insert or update) fail with `error`.
    pub fn fail_next_write(&self, error: StoreError) {
        *self.next_failure.lock().unwrap() = Some(error);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn take_failure(&self) -> StoreResult<()> {
        match self.next_failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn check_unique(
        contacts: &[Contact],
        skip: Option<&ContactId>,
        name: &str,
        phone: &PhoneNumber,
    ) -> StoreResult<()> {
        for other in contacts.iter().filter(|c| Some(&c.id) != skip) {
            if &other.phone == phone {
                return Err(StoreError::UniqueViolation("contacts.phone".to_string()));
            }
            if other.name == name && &other.phone == phone {
                return Err(StoreError::UniqueViolation(
                    "contacts.name, contacts.phone".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn find_by_id(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        self.track_call("find_by_id");

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().find(|c| &c.id == id).cloned())
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> StoreResult<Option<Contact>> {
        self.track_call("find_by_phone");

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().find(|c| &c.phone == phone).cloned())
    }

    async fn list_newest_first(&self) -> StoreResult<Vec<Contact>> {
        self.track_call("list_newest_first");

        let contacts = self.contacts.lock().unwrap();
        let mut result: Vec<Contact> = contacts.iter().rev().cloned().collect();
        // Stable sort keeps later insertions first among equal timestamps
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>> {
        self.track_call("search");

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .iter()
            .filter(|c| c.matches_query(query))
            .cloned()
            .collect())
    }

    async fn insert(&self, contact: NewContact) -> StoreResult<Contact> {
        self.track_call("insert");
        self.take_failure()?;

        let mut contacts = self.contacts.lock().unwrap();
        Self::check_unique(&contacts, None, &contact.name, &contact.phone)?;

        let now = timestamp_now();
        let created = Contact {
            id: ContactId::generate(),
            name: contact.name,
            phone: contact.phone,
            email: contact.email,
            created_at: now,
            updated_at: now,
        };
        contacts.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &ContactId,
        patch: &ContactPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Contact>> {
        self.track_call("update");
        self.take_failure()?;

        let mut contacts = self.contacts.lock().unwrap();
        let Some(index) = contacts.iter().position(|c| &c.id == id) else {
            return Ok(None);
        };

        let mut updated = contacts[index].clone();
        patch.apply_to(&mut updated, updated_at);
        Self::check_unique(&contacts, Some(id), &updated.name, &updated.phone)?;

        contacts[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: &ContactId) -> StoreResult<bool> {
        self.track_call("delete");

        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|c| &c.id != id);
        Ok(contacts.len() != before)
    }
}
