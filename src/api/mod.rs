//! HTTP surface of the service.
//!
//! Request bodies and query strings are parsed into DTOs, checked, and handed to
//! the application services; results come back as JSON.
//!
//! - [`dto`] - Request/response shapes
//! - [`handlers`] - One handler per endpoint
//! - [`middleware`] - API key, CORS and tracing layers
//! - [`routes`] - The `/api` route table

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
