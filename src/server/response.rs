//! Mapping of service results onto HTTP responses.

use crate::error::ContactError;
use crate::models::{ApiResponse, FieldError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Status code for each service error kind.
pub fn error_status(error: &ContactError) -> StatusCode {
    match error {
        ContactError::Validation(_) => StatusCode::BAD_REQUEST,
        ContactError::Conflict(_) => StatusCode::CONFLICT,
        ContactError::NotFound(_) => StatusCode::NOT_FOUND,
        ContactError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = error_status(&self);

        let body = match &self {
            ContactError::Validation(errors) => ApiResponse::<()>::error(
                self.to_string(),
                Some(errors.iter().map(FieldError::from).collect()),
            ),
            _ => ApiResponse::<()>::error(self.to_string(), None),
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!(status = status.as_u16(), "Request rejected: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

/// Response for a request body that is not valid JSON for the endpoint.
pub fn malformed_body(rejection: JsonRejection) -> Response {
    let body = ApiResponse::<()>::error(
        "Malformed request body",
        Some(vec![FieldError {
            field: "body".to_string(),
            message: rejection.body_text(),
        }]),
    );
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
