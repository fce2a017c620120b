use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Email already taken")]
    DuplicateEmail,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid sort option: {0}")]
    InvalidSortOption(String),

    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::Database(sea_orm::DbErr::Conn(_))
                | DomainError::Database(sea_orm::DbErr::ConnectionAcquire(_))
        )
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
