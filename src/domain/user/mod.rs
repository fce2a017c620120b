//! User aggregate
//!
//! Contains the User entity, DTOs, sort clauses, and repository interface.

pub mod model;
pub mod repository;
pub mod sort;

mod dto_create;
mod dto_get;
mod dto_update;

// Re-export model types
pub use model::{PublicUser, User, UserRole};

// Re-export DTOs
pub use dto_create::{CreateUserDto, NewUser};
pub use dto_get::{QueryOptions, UserFilter, DEFAULT_LIMIT, DEFAULT_OFFSET};
pub use dto_update::{UpdateUserDto, UserChanges};

pub use sort::{SortDirection, SortField, SortSpec};

// Re-export repository trait
pub use repository::UserRepositoryInterface;
