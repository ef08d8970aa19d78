//! DTOs for the shortening endpoint.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::application::services::AllocationRequest;
use crate::utils::url_validator::is_http_url;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL (must start with `http://` or `https://`).
    #[validate(custom(function = "validate_scheme"))]
    pub original_url: String,

    /// Days until the short URL stops resolving.
    #[validate(range(min = 0, message = "expires_in_days must be >= 0"))]
    pub expires_in_days: Option<i64>,

    /// Optional custom short code.
    #[validate(length(min = 3, max = 20, message = "Custom code must be 3-20 characters"))]
    pub custom_code: Option<String>,

    /// Free-text attribution.
    pub created_by: Option<String>,
}

fn validate_scheme(url: &str) -> Result<(), ValidationError> {
    if is_http_url(url) {
        Ok(())
    } else {
        Err(ValidationError::new("url_scheme")
            .with_message("URL must start with http:// or https://".into()))
    }
}

impl From<ShortenRequest> for AllocationRequest {
    fn from(r: ShortenRequest) -> Self {
        AllocationRequest {
            original_url: r.original_url,
            expires_in_days: r.expires_in_days,
            custom_code: r.custom_code,
            created_by: r.created_by,
        }
    }
}
