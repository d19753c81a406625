//! Response helpers shared by the route handlers.

use crate::pagination::PageError;
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Validation messages keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Flattens `validator` errors into `field -> [messages]`.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value for {field}"),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Joins every message into one line, e.g. for the envelope's `message`.
pub fn format_validation_errors(errors: &FieldErrors) -> String {
    errors
        .values()
        .flatten()
        .cloned()
        .collect::<Vec<_>>()
        .join("; ")
}

/// `400 Bad Request` carrying the per-field messages as `data`.
pub fn validation_failed(errors: FieldErrors) -> Response {
    let message = format_validation_errors(&errors);
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error_with(errors, message)),
    )
        .into_response()
}

pub fn field_error(field: &str, message: &str) -> Response {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_owned(), vec![message.to_owned()]);
    validation_failed(errors)
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<Empty>::error(message))).into_response()
}

pub fn not_found(message: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, message)
}

pub fn conflict(message: &str) -> Response {
    error_response(StatusCode::CONFLICT, message)
}

/// Logs the store failure and answers `500`.
pub fn db_failure(context: &str, err: DbErr) -> Response {
    tracing::error!(error = %err, "{context}");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
}

pub fn page_failure(context: &str, err: PageError) -> Response {
    match err {
        PageError::InvalidPage => not_found("Invalid page"),
        PageError::Db(err) => db_failure(context, err),
    }
}
