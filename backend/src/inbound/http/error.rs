//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type transport-agnostic while giving Actix
//! handlers the exact legacy envelopes this service is contracted to
//! return: `{"error": ...}` for most failures, the capital-E
//! `{"Error": ...}` envelope for conflicts, and a redacted body for
//! internal failures.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self.code() {
            ErrorCode::Conflict => builder.json(json!({ "Error": self.message() })),
            ErrorCode::InternalError => {
                // Never leak the underlying failure to clients.
                error!(error = %self, "request failed");
                builder.json(json!({ "error": "Internal server error" }))
            }
            _ => builder.json(json!({ "error": self.message() })),
        }
    }
}
