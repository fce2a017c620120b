//! User Service bootstrap
//!
//! Loads configuration, prepares the database schema and seeds the
//! default admin account. Reads configuration from a TOML file
//! (~/.config/user-service/config.toml, or `USER_SERVICE_CONFIG`).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use user_service::domain::{CreateUserDto, UserFilter, UserRepositoryInterface, UserRole};
use user_service::infrastructure::database::migrator::Migrator;
use user_service::{
    default_config_path, init_database, AppConfig, DomainError, SeaOrmUserRepository, UserService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("USER_SERVICE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting user service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = app_cfg.database_config();
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
    let users = UserService::new(repo).with_hash_cost(app_cfg.security.bcrypt_cost);

    create_default_admin(&users, &app_cfg).await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    Ok(())
}

/// Create default admin user if no users exist
async fn create_default_admin(
    users: &UserService<SeaOrmUserRepository>,
    app_cfg: &AppConfig,
) -> Result<(), DomainError> {
    if users.repository().count(&UserFilter::default()).await? > 0 {
        return Ok(());
    }

    info!("Creating default admin user...");

    let dto = CreateUserDto {
        name: app_cfg.admin.name.clone(),
        email: app_cfg.admin.email.clone(),
        password: app_cfg.admin.password.clone(),
        role: Some(UserRole::Admin),
        is_email_verified: Some(true),
    };

    match users.create_user(dto).await {
        Ok(admin) => {
            info!("Default admin created: {}", admin.email);
            warn!("Please change the admin password immediately!");
            Ok(())
        }
        // Another instance seeded it first
        Err(DomainError::DuplicateEmail) => Ok(()),
        Err(e) => {
            error!("Failed to create admin user: {}", e);
            Err(e)
        }
    }
}
