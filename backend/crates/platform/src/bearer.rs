//! Bearer Credential Extraction
//!
//! Pulls the token out of `Authorization: Bearer <token>`.

use axum::http::{HeaderMap, header};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract a bearer token from headers
///
/// Returns `None` when the header is absent, not valid UTF-8, uses another
/// scheme, or carries an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();

    let token = match value.get(..BEARER_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(BEARER_PREFIX) => {
            value[BEARER_PREFIX.len()..].trim()
        }
        _ => return None,
    };

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Build an `Authorization` header value for a token
pub fn bearer_header_value(token: &str) -> String {
    format!("{BEARER_PREFIX}{token}")
}
