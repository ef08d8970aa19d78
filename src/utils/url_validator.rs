//! Precondition checks for target URLs.

use crate::error::AppError;
use serde_json::json;

const ALLOWED_SCHEMES: &[&str] = &["http://", "https://"];

/// Returns true if `url` starts with `http://` or `https://`.
pub fn is_http_url(url: &str) -> bool {
    ALLOWED_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

/// Validates that the target URL uses an HTTP(S) scheme.
///
/// # Errors
///
/// Returns [`AppError::Validation`] otherwise.
pub fn validate_original_url(url: &str) -> Result<(), AppError> {
    if !is_http_url(url) {
        return Err(AppError::bad_request(
            "URL must start with http:// or https://",
            json!({ "original_url": url }),
        ));
    }

    Ok(())
}
