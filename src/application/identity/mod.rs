//! Identity module: user management
//!
//! Contains the `UserService` which owns the validation and redaction
//! policy wrapped around the user store.

pub mod queries;
pub mod service;

pub use queries::parse_order;
pub use service::UserService;
