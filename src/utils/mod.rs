//! Utility functions and helpers.
//!
//! This module contains key redaction and logging setup.

pub mod logging;

/// Number of leading characters of a key kept visible when redacting
const REDACT_VISIBLE_CHARS: usize = 4;

/// Keys at or below this length are masked entirely
const REDACT_MIN_LEN: usize = 8;

/// Mask an API key for logging or echoing back to a client
///
/// Short keys are hidden completely; longer ones keep a four character prefix
/// so operators can tell keys apart.
pub fn redact_key(key: &str) -> String {
    if key.chars().count() <= REDACT_MIN_LEN {
        return "****".to_string();
    }

    let prefix: String = key.chars().take(REDACT_VISIBLE_CHARS).collect();
    format!("{}****", prefix)
}
