//! Error taxonomy and HTTP mapping.
//!
//! Client input errors carry their exact message to the caller; policy and
//! downstream failures answer with a generic message and full detail goes
//! to the server log only. Spam is deliberately NOT an error: the handler
//! masks it as success so automated senders get no feedback.

use crate::email::EmailError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Client input error; the message is surfaced verbatim as a 400.
    #[error("{0}")]
    Validation(&'static str),

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, *message),
            AppError::Email(EmailError::Unconfigured) => {
                error!("Contact submission rejected: email service not configured");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Email service is not available",
                )
            }
            AppError::Email(cause) => {
                error!("Email dispatch failed: {}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message")
            }
            AppError::Internal(cause) => {
                error!("Unhandled error: {:#}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
