//! Test database harness
//!
//! Each test owns a `TestDb`: a private database with the schema applied.
//! Nothing is global, so tests run in parallel without interfering.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use user_service::infrastructure::crypto::password::MIN_COST;
use user_service::infrastructure::database::migrator::Migrator;
use user_service::{init_database, truncate_all, DatabaseConfig, SeaOrmUserRepository, UserService};

pub struct TestDb {
    pub db: DatabaseConnection,
}

impl TestDb {
    /// Open a fresh database and run migrations.
    ///
    /// Uses an in-memory SQLite database unless `TEST_DATABASE_URL` is set.
    pub async fn setup() -> Self {
        let config = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => DatabaseConfig {
                url,
                max_connections: None,
            },
            Err(_) => DatabaseConfig::sqlite_in_memory(),
        };

        let db = init_database(&config)
            .await
            .expect("Failed to connect to test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let test_db = Self { db };
        // A shared external database may hold rows from an earlier run
        test_db.truncate().await;
        test_db
    }

    /// Empty every known table.
    pub async fn truncate(&self) {
        truncate_all(&self.db)
            .await
            .expect("Failed to truncate tables");
    }

    pub fn user_service(&self) -> UserService<SeaOrmUserRepository> {
        UserService::new(Arc::new(SeaOrmUserRepository::new(self.db.clone())))
            .with_hash_cost(MIN_COST)
    }

    pub async fn close(self) {
        self.db.close().await.expect("Failed to close test database");
    }
}
