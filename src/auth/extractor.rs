//! actix-web extractor for API keys.

use std::fmt;
use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use tracing::debug;

use super::get_api_key;
use crate::error::AuthError;
use crate::utils::redact_key;

/// API key taken from the request's `Authorization` header
///
/// Handlers that take an `ApiKey` argument only run when the header parses;
/// otherwise the request is rejected with the [`AuthError`] as a 401.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the key
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for ApiKey {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&redact_key(&self.0)).finish()
    }
}

impl FromRequest for ApiKey {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = get_api_key(req.headers()).map(ApiKey::new);

        match &result {
            Ok(key) => debug!(path = %req.path(), key = %redact_key(key), "API key extracted"),
            Err(err) => debug!(path = %req.path(), error = %err, "Rejected request without API key"),
        }

        ready(result)
    }
}
