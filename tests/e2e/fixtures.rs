//! Request fixtures for end-to-end tests.

use contact_app::CreateContactRequest;

#[allow(dead_code)]
pub fn john_doe() -> CreateContactRequest {
    CreateContactRequest::new("John Doe", "+6281234567890", "john@example.com")
}

#[allow(dead_code)]
pub fn jane_doe() -> CreateContactRequest {
    CreateContactRequest::new("Jane Doe", "+6289876543210", "jane@example.com")
}

/// `count` distinct valid contacts, numbered from 1.
#[allow(dead_code)]
pub fn numbered(count: usize) -> Vec<CreateContactRequest> {
    (1..=count)
        .map(|i| {
            CreateContactRequest::new(
                format!("Person {:02}", i),
                format!("08{:010}", i),
                format!("person{}@example.com", i),
            )
        })
        .collect()
}
