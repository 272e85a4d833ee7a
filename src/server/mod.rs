//! HTTP server for the contact API.
//!
//! Routes:
//! - `POST   /contacts`            create
//! - `GET    /contacts`            list, newest first
//! - `GET    /contacts/search?q=`  search
//! - `GET    /contacts/:id`        fetch one
//! - `PATCH  /contacts/:id`        partial update
//! - `DELETE /contacts/:id`        delete

pub mod handlers;
pub mod response;

pub use handlers::AppState;

use crate::services::ContactService;
use anyhow::Result;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the API router around a contact service.
pub fn router(contact_service: Arc<dyn ContactService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/contacts",
            post(handlers::create_contact).get(handlers::list_contacts),
        )
        .route("/contacts/search", get(handlers::search_contacts))
        .route(
            "/contacts/:id",
            get(handlers::get_contact)
                .patch(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { contact_service })
}

/// Serve the API on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    contact_service: Arc<dyn ContactService>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(contact_service);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

/// Bind `addr` and serve the API until Ctrl+C or SIGTERM.
pub async fn run_server(addr: SocketAddr, contact_service: Arc<dyn ContactService>) -> Result<()> {
    info!("Binding to {addr}");
    let listener = TcpListener::bind(addr).await?;
    info!("Contact API running on {addr}");

    serve(listener, contact_service, shutdown_signal()).await?;

    info!("Contact API shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
