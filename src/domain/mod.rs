//! Domain layer: the user aggregate and its store contract

pub mod user;

pub use user::{
    CreateUserDto, NewUser, PublicUser, QueryOptions, SortDirection, SortField, SortSpec,
    UpdateUserDto, User, UserChanges, UserFilter, UserRepositoryInterface, UserRole,
};

pub use crate::shared::errors::{DomainError, DomainResult};
