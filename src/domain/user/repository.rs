use async_trait::async_trait;

use super::{NewUser, PublicUser, SortSpec, User, UserChanges, UserFilter};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

/// Persistence contract the user service runs against.
///
/// Write methods must report a duplicate email as
/// `DomainError::DuplicateEmail`, whatever the backend's native error is.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn count(&self, filter: &UserFilter) -> DomainResult<u64>;

    async fn create(&self, user: NewUser) -> DomainResult<User>;

    /// Matching rows, redacted, plus the total number of matches
    /// ignoring `limit` and `offset`.
    async fn find_and_count_all(
        &self,
        filter: &UserFilter,
        sort: &[SortSpec],
        limit: u64,
        offset: u64,
    ) -> DomainResult<PaginatedResult<PublicUser>>;

    async fn find_by_pk(&self, id: &str) -> DomainResult<Option<PublicUser>>;
    async fn find_one(&self, filter: &UserFilter) -> DomainResult<Option<User>>;

    /// Returns the number of affected rows.
    async fn update(&self, id: &str, changes: UserChanges) -> DomainResult<u64>;
    async fn destroy(&self, id: &str) -> DomainResult<u64>;
}
