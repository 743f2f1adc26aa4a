//! API error types and responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use multiplan_core::BillingError;

use crate::stripe::{StripeError, WebhookError};

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested plan selection was rejected.
    #[error(transparent)]
    Billing(#[from] BillingError),

    /// Webhook delivery failed authentication or parsing.
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    /// The payment provider returned an error.
    #[error(transparent)]
    Provider(#[from] StripeError),

    /// The request body could not be read as the expected JSON.
    #[error("invalid request body: {0}")]
    RequestBody(String),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::RequestBody(rejection.body_text())
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl ErrorResponse {
    fn new(message: String) -> Self {
        Self {
            error: ErrorBody { message },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Billing(err) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(err.to_string())),
            )
                .into_response(),
            // The provider only needs the status; the body is never read.
            Self::Webhook(_) => StatusCode::BAD_REQUEST.into_response(),
            Self::Provider(err) => {
                tracing::error!(error = %err, "Payment provider request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(err.client_message())),
                )
                    .into_response()
            }
            Self::RequestBody(msg) | Self::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(msg)),
                )
                    .into_response()
            }
        }
    }
}
