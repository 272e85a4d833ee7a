//! HTTP handlers for the `/contacts` resource.
//!
//! Each handler is a thin translation between the envelope format and a
//! single `ContactService` call.

use super::response::malformed_body;
use crate::error::ContactError;
use crate::models::{ApiResponse, Contact, CreateContactRequest, UpdateContactRequest};
use crate::services::ContactService;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub contact_service: Arc<dyn ContactService>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: Option<String>,
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ContactError>;

/// `POST /contacts`
pub async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<CreateContactRequest>, JsonRejection>,
) -> Response {
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match state.contact_service.create(input).await {
        Ok(contact) => (
            StatusCode::CREATED,
            Json(ApiResponse::success("Contact created successfully", contact)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /contacts`
pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<Vec<Contact>> {
    let contacts = state.contact_service.find_all().await?;
    Ok(Json(ApiResponse::success(
        "Contacts retrieved successfully",
        contacts,
    )))
}

/// `GET /contacts/search?q=`
pub async fn search_contacts(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<Contact>> {
    let query = params.q.unwrap_or_default();
    tracing::debug!("Searching contacts for {:?}", query);

    let contacts = state.contact_service.search(&query).await?;
    Ok(Json(ApiResponse::success(
        "Search results retrieved successfully",
        contacts,
    )))
}

/// `GET /contacts/:id`
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Contact> {
    let contact = state.contact_service.find_one(&id).await?;
    Ok(Json(ApiResponse::success("Contact found", contact)))
}

/// `PATCH /contacts/:id`
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateContactRequest>, JsonRejection>,
) -> Response {
    let Json(patch) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match state.contact_service.update(&id, patch).await {
        Ok(contact) => Json(ApiResponse::success("Contact updated successfully", contact))
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// `DELETE /contacts/:id`
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.contact_service.remove(&id).await?;
    Ok(Json(ApiResponse::empty("Contact deleted successfully")))
}
