//! Contact list orchestration.
//!
//! The controller owns the list state and drives the contact client: the
//! initial load, debounced search with a local fallback, and the optimistic
//! list updates that follow a create, update or delete.

use super::debounce::SearchDebouncer;
use super::form::ContactForm;
use super::notice::Notice;
use super::state::ContactListState;
use crate::client::AsyncContactClient;
use crate::config::Config;
use crate::domain::ContactId;
use crate::models::{Contact, CreateContactRequest, UpdateContactRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

pub const CONTACT_ADDED: &str = "Contact added successfully!";
pub const ADD_FAILED: &str = "Failed to add contact. Please try again.";
pub const CONTACT_UPDATED: &str = "Contact updated successfully!";
pub const UPDATE_FAILED: &str = "Failed to update contact. Please try again.";
pub const CONTACT_DELETED: &str = "Contact deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete contact. Please try again.";
pub const SEARCH_OFFLINE: &str = "Search is unavailable. Showing matches from loaded contacts.";

pub struct ContactListController {
    client: Arc<dyn AsyncContactClient>,
    state: ContactListState,
    form: Option<ContactForm>,
    debouncer: SearchDebouncer,
    notices: Vec<Notice>,
}

impl ContactListController {
    pub fn new(
        client: Arc<dyn AsyncContactClient>,
        items_per_page: usize,
        search_debounce: Duration,
    ) -> Self {
        Self {
            client,
            state: ContactListState::new(items_per_page),
            form: None,
            debouncer: SearchDebouncer::new(search_debounce),
            notices: Vec::new(),
        }
    }

    /// Controller using the configured page size and debounce period.
    pub fn from_config(client: Arc<dyn AsyncContactClient>, config: &Config) -> Self {
        Self::new(
            client,
            config.page_size,
            Duration::from_millis(config.search_debounce_ms),
        )
    }

    pub fn state(&self) -> &ContactListState {
        &self.state
    }

    pub fn form(&self) -> Option<&ContactForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ContactForm> {
        self.form.as_mut()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand the queued notices to the rendering layer.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn change_page(&mut self, page: usize) -> bool {
        self.state.change_page(page)
    }

    // ========================= Loading =========================

    pub async fn load_contacts(&mut self) {
        debug!("Loading contacts");
        self.state.begin_load();

        match self.client.get_contacts().await {
            Ok(response) => {
                let contacts = response.data.unwrap_or_default();
                info!("Loaded {} contacts", contacts.len());
                self.state.contacts_loaded(contacts);
            }
            Err(e) => {
                error!("Failed to load contacts: {}", e);
                self.state.load_failed();
            }
        }
    }

    // ========================= Search =========================

    /// Record a keystroke in the search box. The search itself runs once
    /// the input has been quiet for the debounce period.
    pub fn on_search_input(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.state.search_term = term.clone();
        self.debouncer.push(term, Instant::now());
    }

    /// Run the pending search if it is due. Returns true if one ran.
    pub async fn poll_search(&mut self) -> bool {
        match self.debouncer.poll(Instant::now()) {
            Some(term) => {
                self.search(&term).await;
                true
            }
            None => false,
        }
    }

    /// Wait out the pending quiet period, then run the search if it fires.
    pub async fn flush_search(&mut self) -> bool {
        while let Some(deadline) = self.debouncer.next_deadline() {
            tokio::time::sleep_until(deadline).await;
            if self.poll_search().await {
                return true;
            }
        }
        false
    }

    /// Feed search input from a channel until the sender closes.
    ///
    /// Input still inside its quiet period when the channel closes is dropped.
    pub async fn run_search_input(&mut self, mut input: mpsc::Receiver<String>) {
        loop {
            let deadline = self.debouncer.next_deadline();

            tokio::select! {
                received = input.recv() => match received {
                    Some(term) => self.on_search_input(term),
                    None => break,
                },
                _ = wait_until(deadline) => {
                    self.poll_search().await;
                }
            }
        }
    }

    /// Search immediately, bypassing the debounce.
    ///
    /// A blank term shows every loaded contact without a request. If the
    /// server search fails the loaded contacts are filtered locally and an
    /// info notice says so.
    pub async fn search(&mut self, term: &str) {
        if term.trim().is_empty() {
            self.state.search_cleared();
            return;
        }

        self.state.is_loading = true;
        match self.client.search_contacts(term).await {
            Ok(response) => {
                let results = response.data.unwrap_or_default();
                debug!("Search {:?} returned {} contacts", term, results.len());
                self.state.search_results(results);
            }
            Err(e) => {
                warn!("Search failed, filtering locally: {}", e);
                self.state.search_fell_back(term);
                self.notices.push(Notice::info(SEARCH_OFFLINE));
            }
        }
    }

    // ========================= Form =========================

    pub fn add_contact(&mut self) {
        self.state.show_add_form();
        self.form = Some(ContactForm::new());
    }

    pub fn edit_contact(&mut self, contact: &Contact) {
        self.state.show_edit_form(contact.clone());
        self.form = Some(ContactForm::for_contact(contact));
    }

    pub fn cancel_form(&mut self) {
        self.state.hide_form();
        self.form = None;
    }

    /// Submit the open form as a create or an update.
    ///
    /// Returns true when the write succeeded. Invalid or already-submitting
    /// forms send nothing.
    pub async fn handle_form_submit(&mut self) -> bool {
        let Some(request) = self.form.as_mut().and_then(ContactForm::submit) else {
            return false;
        };

        let editing = if self.state.is_edit_mode {
            self.state.selected_contact.as_ref().map(|c| c.id.clone())
        } else {
            None
        };

        let saved = match editing {
            Some(id) => {
                self.update_contact(&id, &UpdateContactRequest::from(request))
                    .await
            }
            None => self.create_contact(&request).await,
        };

        if let Some(form) = self.form.as_mut() {
            form.complete();
        }
        if !self.state.is_form_visible {
            self.form = None;
        }
        saved
    }

    // ========================= Mutations =========================

    pub async fn create_contact(&mut self, request: &CreateContactRequest) -> bool {
        match self.client.create_contact(request).await {
            Ok(response) => match response.data {
                Some(contact) => {
                    info!("Created contact {}", contact.id);
                    self.state.contact_created(contact);
                    self.notices.push(Notice::success(CONTACT_ADDED));
                    true
                }
                None => {
                    error!("Create response carried no contact");
                    self.notices.push(Notice::error(ADD_FAILED));
                    false
                }
            },
            Err(e) => {
                error!("Failed to create contact: {}", e);
                self.notices.push(Notice::error(ADD_FAILED));
                false
            }
        }
    }

    pub async fn update_contact(&mut self, id: &ContactId, request: &UpdateContactRequest) -> bool {
        match self.client.update_contact(id.as_str(), request).await {
            Ok(response) => match response.data {
                Some(contact) => {
                    info!("Updated contact {}", contact.id);
                    self.state.contact_updated(contact);
                    self.notices.push(Notice::success(CONTACT_UPDATED));
                    true
                }
                None => {
                    error!("Update response carried no contact");
                    self.notices.push(Notice::error(UPDATE_FAILED));
                    false
                }
            },
            Err(e) => {
                error!("Failed to update contact {}: {}", id, e);
                self.notices.push(Notice::error(UPDATE_FAILED));
                false
            }
        }
    }

    /// Delete a contact the user has already confirmed.
    ///
    /// A second delete for the same id while one is in flight is ignored.
    pub async fn delete_contact(&mut self, id: &ContactId) -> bool {
        if !self.state.begin_delete(id) {
            return false;
        }

        let result = self.client.delete_contact(id.as_str()).await;
        self.state.end_delete(id);

        match result {
            Ok(_) => {
                info!("Deleted contact {}", id);
                self.state.contact_deleted(id);
                self.notices.push(Notice::success(CONTACT_DELETED));
                true
            }
            Err(e) => {
                error!("Failed to delete contact {}: {}", id, e);
                self.notices.push(Notice::error(DELETE_FAILED));
                false
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
