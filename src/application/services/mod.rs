//! Business logic services for the application layer.

pub mod allocation_service;
pub mod redirect_service;

pub use allocation_service::{AllocationRequest, AllocationService, DEFAULT_MAX_ATTEMPTS};
pub use redirect_service::RedirectService;
