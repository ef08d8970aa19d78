//! Short code generation and validation utilities.
//!
//! Generated codes are drawn from the 62-character alphanumeric alphabet
//! (`a-z`, `A-Z`, `0-9`). Uniqueness is not guaranteed here; the store's unique
//! constraint decides, and [`crate::application::services::AllocationService`]
//! retries on collision.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde_json::json;

/// Default length of generated codes (62^6 ≈ 5.6 × 10^10 possible codes).
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Minimum length of a custom code.
pub const CUSTOM_CODE_MIN_LENGTH: usize = 3;

/// Maximum length of a custom code.
pub const CUSTOM_CODE_MAX_LENGTH: usize = 20;

/// Codes that would shadow service routes.
const RESERVED_CODES: &[&str] = &["api", "health"];

/// Source of candidate short codes.
///
/// Implementations are pure generators and never touch storage.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces the next candidate code.
    fn generate(&self) -> String;
}

/// Uniform random alphanumeric codes of a fixed length.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code(self.length)
    }
}

/// Generates a random code of `length` characters.
///
/// Each character is sampled independently and uniformly from `[a-zA-Z0-9]`.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Must stay a single path segment: no `/`, `?`, `#`, `%`, whitespace or
///   control characters
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    let length = code.chars().count();
    if !(CUSTOM_CODE_MIN_LENGTH..=CUSTOM_CODE_MAX_LENGTH).contains(&length) {
        return Err(AppError::bad_request(
            "Custom code must be 3-20 characters",
            json!({ "provided_length": length }),
        ));
    }

    if let Some(c) = code.chars().find(|&c| !is_path_segment_char(c)) {
        return Err(AppError::bad_request(
            "Custom code cannot contain '/', '?', '#', '%', whitespace or control characters",
            json!({ "code": code, "invalid_char": c.to_string() }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

fn is_path_segment_char(c: char) -> bool {
    !matches!(c, '/' | '?' | '#' | '%') && !c.is_whitespace() && !c.is_control()
}
