//! # User Service
//!
//! CRUD service layer for user records stored behind SeaORM.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: User model, DTOs, sort clauses and the store trait
//! - **application**: `UserService` (validation and redaction policy)
//! - **infrastructure**: SeaORM entity, migration and store, in-memory store, password hashing
//! - **shared**: Error taxonomy and pagination types
//! - **config**: TOML application configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export the service and its stores for easy access
pub use application::UserService;
pub use infrastructure::{
    init_database, truncate_all, DatabaseConfig, InMemoryUserRepository, SeaOrmUserRepository,
};

pub use shared::{DomainError, DomainResult, PaginatedResult};
