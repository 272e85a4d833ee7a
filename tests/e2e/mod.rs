//! End-to-end test utilities.
//!
//! Each test gets its own API server on an ephemeral port, backed by a fresh
//! in-memory SQLite store.

use contact_app::repositories::SqliteContactRepository;
use contact_app::services::{ContactService, ContactServiceImpl};
use contact_app::{AsyncContactClientImpl, Contact, ContactClient};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub mod fixtures;

/// A running API server. Shuts down when dropped.
pub struct TestServer {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Start a server on 127.0.0.1 with an empty store.
    pub async fn start() -> Self {
        let repository = SqliteContactRepository::open_in_memory().expect("open in-memory store");
        let service =
            Arc::new(ContactServiceImpl::new(Arc::new(repository))) as Arc<dyn ContactService>;

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            if let Err(e) = contact_app::server::serve(listener, service, shutdown).await {
                eprintln!("test server failed: {e}");
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    /// Async client pointed at this server.
    #[allow(dead_code)]
    pub fn client(&self) -> AsyncContactClientImpl {
        AsyncContactClientImpl::new(ContactClient::with_base_url(self.base_url.clone()))
    }

    /// Stop the server and wait for it to finish.
    #[allow(dead_code)]
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Assert that a contact has the fields every stored contact must have.
#[allow(dead_code)]
pub fn assert_contact_valid(contact: &Contact) {
    assert!(!contact.id.as_str().is_empty(), "Contact ID should not be empty");
    assert!(!contact.name.trim().is_empty(), "Contact name should not be empty");
    assert!(
        contact.updated_at >= contact.created_at,
        "updatedAt should not precede createdAt"
    );
}
