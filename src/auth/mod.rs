//! API key extraction from HTTP `Authorization` headers.
//!
//! Clients send their key as `Authorization: ApiKey <key>`. [`get_api_key`]
//! parses that header out of a request's header map; [`ApiKey`] wraps the
//! same parser as an actix-web extractor for use in handlers.

pub mod extractor;

use actix_web::http::header::{HeaderMap, AUTHORIZATION};

use crate::error::AuthError;

pub use extractor::ApiKey;

/// Authorization scheme that must precede the key
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Extract the API key from request headers
///
/// Looks up the `Authorization` header (first value wins), splits it on runs
/// of whitespace and returns the field following the `ApiKey` scheme. Fields
/// after the key are ignored. The scheme is matched case-sensitively.
///
/// # Errors
/// * [`AuthError::NoAuthHeader`] if the header is absent or empty
/// * [`AuthError::MalformedAuthHeader`] if the scheme is wrong, the key is
///   missing, or the value is not visible ASCII
pub fn get_api_key(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = match headers.get(AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::NoAuthHeader),
    };
    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedAuthHeader)?;

    let mut fields = value.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(API_KEY_SCHEME), Some(key)) => Ok(key),
        _ => Err(AuthError::MalformedAuthHeader),
    }
}
