//! Utility functions for code generation, input validation, and error mapping.
//!
//! - [`code_generator`] - Short code generation and custom code validation
//! - [`url_validator`] - Target URL precondition checks
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
