//! # apikey-auth
//!
//! API key extraction for HTTP services.
//!
//! Clients authenticate by sending `Authorization: ApiKey <key>`. This crate
//! parses that header into the key, or into a typed [`AuthError`] describing
//! why it could not. It does not decide whether a key is valid; that is left
//! to whatever consumes the key.
//!
//! ## Quick Start
//!
//! ```rust
//! use actix_web::http::header::{HeaderMap, HeaderValue, AUTHORIZATION};
//! use apikey_auth::{get_api_key, AuthError};
//!
//! let mut headers = HeaderMap::new();
//! assert_eq!(get_api_key(&headers), Err(AuthError::NoAuthHeader));
//!
//! headers.insert(AUTHORIZATION, HeaderValue::from_static("ApiKey abc123"));
//! assert_eq!(get_api_key(&headers), Ok("abc123"));
//! ```
//!
//! In actix-web handlers take an [`ApiKey`] argument instead; requests
//! without a well-formed header are answered with `401 Unauthorized`.

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod utils;

// Re-export main types for convenience
pub use auth::{get_api_key, ApiKey, API_KEY_SCHEME};
pub use config::Config;
pub use error::{AuthError, ServiceError, ServiceResult};

/// Service name reported by the CLI
pub const SERVICE_NAME: &str = "apikey-auth";

/// Service version
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
