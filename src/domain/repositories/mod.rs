//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! See integration tests in `tests/repository_url.rs` for PostgreSQL usage.

pub mod url_repository;

pub use url_repository::{MAX_LIST_LIMIT, UrlRepository, clamp_page};

#[cfg(test)]
pub use url_repository::MockUrlRepository;
