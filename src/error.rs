//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the error type returned by every handler and
//! gateway in the service. Each variant maps to one HTTP status code and is
//! rendered as a JSON body of the form `{"error": "<message>"}`.
//!
//! Lower-level errors (`TokenError`, `StoreError`, `bcrypt::BcryptError`,
//! `validator::ValidationErrors`) convert into `AppError` through `From`, so
//! the `?` operator can be used everywhere above the storage layer.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;
use crate::store::StoreError;

/// Represents all possible errors that can occur while handling a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Client-correctable input problem (HTTP 400).
    BadRequest(String),
    /// Sign-in failed (HTTP 400). Carries no detail: an unknown username and
    /// a wrong password render the same body.
    AuthenticationFailed,
    /// Missing or rejected identity (HTTP 401).
    Unauthorized(String),
    /// The requested resource does not exist for this caller (HTTP 404).
    NotFound(String),
    /// A uniqueness constraint was hit, e.g. duplicate username (HTTP 409).
    Conflict(String),
    /// Unexpected failure of a primitive such as hashing or signing (HTTP 500).
    InternalServerError(String),
    /// The storage layer failed (HTTP 500). The detail is logged, not returned.
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::AuthenticationFailed => write!(f, "Authentication failed"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into JSON `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::AuthenticationFailed => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::AuthenticationFailed => "sign in failed".to_string(),
            AppError::InternalServerError(msg) | AppError::DatabaseError(msg) => {
                log::error!("{}", msg);
                "internal server error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Storage conflicts become `Conflict`; everything else is a database failure.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::Duplicate(what) => AppError::Conflict(format!("{} already exists", what)),
            StoreError::Unavailable(msg) => AppError::DatabaseError(msg),
        }
    }
}

/// Every token problem is reported to the client the same way; the precise
/// kind is only logged.
impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::Signing(msg) => {
                AppError::InternalServerError(format!("Failed to sign token: {}", msg))
            }
            other => {
                log::debug!("token rejected: {}", other);
                AppError::Unauthorized("invalid token".into())
            }
        }
    }
}

/// Presence checks on request payloads fail as plain bad requests.
impl From<ValidationErrors> for AppError {
    fn from(_: ValidationErrors) -> AppError {
        AppError::BadRequest("invalid inputs".into())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Failed to hash password: {}", error))
    }
}
