//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod storage;

pub use database::{init_database, truncate_all, DatabaseConfig, SeaOrmUserRepository};
pub use storage::InMemoryUserRepository;
