pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmUserRepository;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./users.db?mode=rwc")
    pub url: String,
    /// Upper bound on pooled connections; `None` keeps the driver default
    pub max_connections: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./users.db?mode=rwc".to_string(),
            max_connections: None,
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory SQLite database. Pinned to a single connection
    /// so every query sees the same database.
    pub fn sqlite_in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut options = ConnectOptions::new(config.url.clone());
    options.sqlx_logging(false);
    if let Some(max) = config.max_connections {
        options.max_connections(max).min_connections(max);
    }

    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Delete every row of every table the crate owns.
pub async fn truncate_all(db: &DatabaseConnection) -> Result<(), DbErr> {
    entities::User::delete_many().exec(db).await?;
    Ok(())
}
