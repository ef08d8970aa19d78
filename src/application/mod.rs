//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::allocation_service::AllocationService`] - Short URL creation
//! - [`services::redirect_service::RedirectService`] - Resolution, access counting, statistics

pub mod services;
