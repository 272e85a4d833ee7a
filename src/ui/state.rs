//! Contact list view state and its transitions.
//!
//! Everything here is synchronous and transport-free; the controller calls
//! these transitions with the outcome of each request.

use crate::domain::ContactId;
use crate::models::Contact;
use std::collections::HashSet;

/// Shown when the initial load fails.
pub const LOAD_FAILED: &str = "Failed to load contacts. Please try again.";

/// Insert a newly created contact at the front of `list`.
pub fn apply_created(list: &mut Vec<Contact>, contact: Contact) {
    list.insert(0, contact);
}

/// Replace the contact with the same id in place. Returns false if absent.
pub fn apply_updated(list: &mut [Contact], contact: Contact) -> bool {
    match list.iter_mut().find(|c| c.id == contact.id) {
        Some(slot) => {
            *slot = contact;
            true
        }
        None => false,
    }
}

/// Remove the contact with `id`. Returns false if absent.
pub fn apply_deleted(list: &mut Vec<Contact>, id: &ContactId) -> bool {
    let before = list.len();
    list.retain(|c| &c.id != id);
    list.len() != before
}

/// Offline search used when the server search fails.
///
/// Matches a case-insensitive name substring or a case-sensitive phone
/// substring. Email is not searched.
pub fn local_filter(contacts: &[Contact], term: &str) -> Vec<Contact> {
    let lowered = term.to_lowercase();
    contacts
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&lowered) || c.phone.as_str().contains(term))
        .cloned()
        .collect()
}

#[derive(Debug, Clone)]
pub struct ContactListState {
    /// Everything the last load returned, plus local edits since
    pub contacts: Vec<Contact>,

    /// What the list currently shows, before pagination
    pub filtered_contacts: Vec<Contact>,

    /// 1-based
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,

    pub search_term: String,
    pub is_loading: bool,
    pub error: Option<String>,

    pub selected_contact: Option<Contact>,
    pub is_form_visible: bool,
    pub is_edit_mode: bool,

    deleting: HashSet<ContactId>,
}

impl Default for ContactListState {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ContactListState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            contacts: Vec::new(),
            filtered_contacts: Vec::new(),
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items: 0,
            search_term: String::new(),
            is_loading: false,
            error: None,
            selected_contact: None,
            is_form_visible: false,
            is_edit_mode: false,
            deleting: HashSet::new(),
        }
    }

    // ---- pagination ----

    /// The slice of `filtered_contacts` on the current page.
    pub fn paginated(&self) -> &[Contact] {
        let start = (self.current_page - 1) * self.items_per_page;
        if start >= self.filtered_contacts.len() {
            return &[];
        }
        let end = (start + self.items_per_page).min(self.filtered_contacts.len());
        &self.filtered_contacts[start..end]
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page)
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages()).collect()
    }

    /// Move to `page`; out-of-range pages are ignored.
    pub fn change_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    // ---- loading & search ----

    pub fn begin_load(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// The page is left alone so a reload keeps the user's place.
    pub fn contacts_loaded(&mut self, contacts: Vec<Contact>) {
        self.filtered_contacts = contacts.clone();
        self.total_items = contacts.len();
        self.contacts = contacts;
        self.is_loading = false;
    }

    pub fn load_failed(&mut self) {
        self.error = Some(LOAD_FAILED.to_string());
        self.is_loading = false;
    }

    /// An empty query shows everything again without asking the server.
    pub fn search_cleared(&mut self) {
        let all = self.contacts.clone();
        self.show_filtered(all);
    }

    pub fn search_results(&mut self, results: Vec<Contact>) {
        self.show_filtered(results);
    }

    pub fn search_fell_back(&mut self, term: &str) {
        let matches = local_filter(&self.contacts, term);
        self.show_filtered(matches);
    }

    fn show_filtered(&mut self, contacts: Vec<Contact>) {
        self.total_items = contacts.len();
        self.filtered_contacts = contacts;
        self.current_page = 1;
        self.is_loading = false;
    }

    // ---- form ----

    pub fn show_add_form(&mut self) {
        self.selected_contact = None;
        self.is_edit_mode = false;
        self.is_form_visible = true;
    }

    pub fn show_edit_form(&mut self, contact: Contact) {
        self.selected_contact = Some(contact);
        self.is_edit_mode = true;
        self.is_form_visible = true;
    }

    pub fn hide_form(&mut self) {
        self.is_form_visible = false;
        self.selected_contact = None;
    }

    // ---- mutations ----

    pub fn contact_created(&mut self, contact: Contact) {
        apply_created(&mut self.contacts, contact.clone());
        apply_created(&mut self.filtered_contacts, contact);
        self.total_items = self.filtered_contacts.len();
        self.is_form_visible = false;
        self.current_page = 1;
    }

    pub fn contact_updated(&mut self, contact: Contact) {
        apply_updated(&mut self.contacts, contact.clone());
        apply_updated(&mut self.filtered_contacts, contact);
        self.hide_form();
    }

    /// Remove a deleted contact, stepping back a page if the current one
    /// is now empty.
    pub fn contact_deleted(&mut self, id: &ContactId) {
        apply_deleted(&mut self.contacts, id);
        apply_deleted(&mut self.filtered_contacts, id);
        self.total_items = self.filtered_contacts.len();

        if self.paginated().is_empty() && self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Mark a delete as in flight. False if one is already running for `id`.
    pub fn begin_delete(&mut self, id: &ContactId) -> bool {
        self.deleting.insert(id.clone())
    }

    pub fn end_delete(&mut self, id: &ContactId) {
        self.deleting.remove(id);
    }

    pub fn is_deleting(&self, id: &ContactId) -> bool {
        self.deleting.contains(id)
    }
}
