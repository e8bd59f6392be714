//! Error handling for API key extraction and the surrounding service.
//!
//! [`AuthError`] is what the header parser returns. It renders as an HTTP 401
//! when it escapes an actix-web handler. [`ServiceError`] covers everything the
//! binary can fail on.

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::API_KEY_SCHEME;

/// Result type alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Failures while reading an API key from request headers
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// The `Authorization` header is missing or empty
    #[error("no authorization header included")]
    NoAuthHeader,

    /// The header is present but not of the form `ApiKey <key>`
    #[error("malformed authorization header")]
    MalformedAuthHeader,
}

impl AuthError {
    /// Stable machine-readable name, used in error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::NoAuthHeader => "no_auth_header",
            AuthError::MalformedAuthHeader => "malformed_auth_header",
        }
    }
}

/// JSON body sent with an authentication rejection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl From<&AuthError> for ErrorBody {
    fn from(err: &AuthError) -> Self {
        Self {
            error: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header((header::WWW_AUTHENTICATE, API_KEY_SCHEME))
            .json(ErrorBody::from(self))
    }
}

/// Top-level error type for the service binary
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Authentication errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Logging setup errors
    #[error("Logging error: {0}")]
    Logging(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        ServiceError::Config(msg.into())
    }
}
