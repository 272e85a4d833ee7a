//! In-memory test doubles for the repository and client seams.

mod mock_contact_client;
mod mock_contact_repository;

#[allow(unused_imports)]
pub use mock_contact_client::MockContactClient;
#[allow(unused_imports)]
pub use mock_contact_repository::MockContactRepository;
