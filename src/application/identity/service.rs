//! User management service: application-layer orchestration
//!
//! All user-related business logic lives here. Callers translate the
//! returned `DomainError` kinds into their own status codes.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::queries::parse_order;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, NewUser, PublicUser, QueryOptions, UpdateUserDto,
    User, UserChanges, UserFilter, UserRepositoryInterface,
};
use crate::infrastructure::crypto::password::{hash_password, verify_password, DEFAULT_COST};
use crate::shared::PaginatedResult;

/// User service, orchestrating the user-management use-cases.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer. Holds no mutable state; share it
/// behind an `Arc`.
///
/// Email uniqueness is checked up front for a clean error, and the store
/// reports `DuplicateEmail` itself when a concurrent writer wins the race
/// between that check and the write.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    hash_cost: u32,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            hash_cost: DEFAULT_COST,
        }
    }

    /// Override the bcrypt cost used for new password hashes.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password(password, self.hash_cost)
            .map_err(|e| DomainError::PasswordHash(e.to_string()))
    }

    async fn email_taken(&self, email: &str) -> DomainResult<bool> {
        Ok(self.repo.count(&UserFilter::by_email(email)).await? > 0)
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Create a user. Fails with `DuplicateEmail` if the email is in use.
    pub async fn create_user(&self, dto: CreateUserDto) -> DomainResult<PublicUser> {
        if self.email_taken(&dto.email).await? {
            warn!(email = %dto.email, "Rejected user creation: email already taken");
            return Err(DomainError::DuplicateEmail);
        }

        let new_user = NewUser {
            name: dto.name,
            email: dto.email,
            password_hash: self.hash(&dto.password)?,
            role: dto.role.unwrap_or_default(),
            is_email_verified: dto.is_email_verified.unwrap_or(false),
        };

        let user = self.repo.create(new_user).await?;

        info!(user_id = %user.id, email = %user.email, "User created");
        Ok(PublicUser::from(user))
    }

    /// Update a user by id and return the redacted result.
    pub async fn update_user_by_id(
        &self,
        user_id: &str,
        dto: UpdateUserDto,
    ) -> DomainResult<PublicUser> {
        let mut user = self
            .get_user_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if let Some(ref email) = dto.email {
            if *email != user.email && self.email_taken(email).await? {
                warn!(user_id, email = %email, "Rejected user update: email already taken");
                return Err(DomainError::DuplicateEmail);
            }
        }

        let password_hash = dto.password.as_deref().map(|p| self.hash(p)).transpose()?;

        let changes = UserChanges {
            name: dto.name.clone(),
            email: dto.email.clone(),
            password_hash,
            role: dto.role,
            is_email_verified: dto.is_email_verified,
        };

        if self.repo.update(user_id, changes).await? == 0 {
            // Deleted between the lookup and the write
            return Err(DomainError::UserNotFound);
        }

        if let Some(name) = dto.name {
            user.name = name;
        }
        if let Some(email) = dto.email {
            user.email = email;
        }
        if let Some(role) = dto.role {
            user.role = role;
        }
        if let Some(verified) = dto.is_email_verified {
            user.is_email_verified = verified;
        }

        info!(user_id, "User updated");
        Ok(user)
    }

    /// Delete a user by id. Returns the deleted record, redacted.
    pub async fn delete_user_by_id(&self, user_id: &str) -> DomainResult<PublicUser> {
        let user = self
            .get_user_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if self.repo.destroy(user_id).await? == 0 {
            return Err(DomainError::UserNotFound);
        }

        info!(user_id, "User deleted");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Query users with filtering, ordering and limit/offset paging.
    pub async fn query_users(
        &self,
        filter: &UserFilter,
        options: &QueryOptions,
    ) -> DomainResult<PaginatedResult<PublicUser>> {
        let sort = match options.order.as_deref() {
            Some(order) => parse_order(order)?,
            None => Vec::new(),
        };

        debug!(?filter, ?sort, limit = options.limit(), offset = options.offset(), "Querying users");

        self.repo
            .find_and_count_all(filter, &sort, options.limit(), options.offset())
            .await
    }

    /// Get a single user by id, redacted. `None` when absent.
    pub async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<PublicUser>> {
        self.repo.find_by_pk(id).await
    }

    /// Get a user by email with every field, password hash included.
    ///
    /// Meant for credential checks inside the service boundary. Convert
    /// with `PublicUser::from` before handing the result to a client.
    pub async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.repo.find_one(&UserFilter::by_email(email)).await
    }

    /// Look up a user by email and check the password against the stored
    /// hash. `None` for an unknown email or a wrong password.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        let Some(user) = self.get_user_by_email(email).await? else {
            return Ok(None);
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        Ok(valid.then_some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::infrastructure::crypto::password::MIN_COST;
    use crate::infrastructure::storage::InMemoryUserRepository;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(Arc::new(InMemoryUserRepository::new())).with_hash_cost(MIN_COST)
    }

    fn create_dto(name: &str, email: &str) -> CreateUserDto {
        CreateUserDto {
            name: name.to_string(),
            email: email.to_string(),
            password: "password1".to_string(),
            role: None,
            is_email_verified: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_returns_redacted_user() {
        let svc = service();
        let user = svc.create_user(create_dto("Alice", "a@x.com")).await.unwrap();

        assert!(!user.id.is_empty());
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_email_verified);

        let full = svc.get_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(full.id, user.id);
        assert!(full.password_hash.starts_with("$2"));
        assert_ne!(full.password_hash, "password1");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let svc = service();
        svc.create_user(create_dto("Alice", "a@x.com")).await.unwrap();

        let err = svc.create_user(create_dto("Other", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail));
        assert_eq!(svc.repository().len(), 1);
    }

    #[tokio::test]
    async fn test_get_user_by_id_missing_is_none() {
        let svc = service();
        assert!(svc.get_user_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_users_order_and_limit() {
        let svc = service();
        svc.create_user(create_dto("A", "a@x.com")).await.unwrap();
        svc.create_user(create_dto("B", "b@x.com")).await.unwrap();

        let options = QueryOptions {
            order: Some("email:desc".to_string()),
            limit: Some(1),
            offset: None,
        };
        let page = svc.query_users(&UserFilter::default(), &options).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].email, "b@x.com");
        assert_eq!(page.offset, 0);
    }

    #[tokio::test]
    async fn test_query_users_defaults_and_filter() {
        let svc = service();
        for i in 0..12 {
            let mut dto = create_dto("N", &format!("u{:02}@x.com", i));
            if i % 3 == 0 {
                dto.role = Some(UserRole::Admin);
            }
            svc.create_user(dto).await.unwrap();
        }

        let page = svc
            .query_users(&UserFilter::default(), &QueryOptions::default())
            .await
            .unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(page.rows.len(), 10);
        assert!(page.has_more());

        let admins = UserFilter {
            role: Some(UserRole::Admin),
            ..Default::default()
        };
        let page = svc.query_users(&admins, &QueryOptions::default()).await.unwrap();
        assert_eq!(page.total, 4);
        assert!(page.rows.iter().all(|u| u.role == UserRole::Admin));
    }

    #[tokio::test]
    async fn test_query_users_invalid_order() {
        let svc = service();
        let options = QueryOptions {
            order: Some("email".to_string()),
            ..Default::default()
        };
        let err = svc
            .query_users(&UserFilter::default(), &options)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidSortOption(_)));
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let svc = service();
        let err = svc
            .update_user_by_id("missing", UpdateUserDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound));
    }

    #[tokio::test]
    async fn test_update_user_email_conflict_keeps_original() {
        let svc = service();
        let alice = svc.create_user(create_dto("Alice", "a@x.com")).await.unwrap();
        svc.create_user(create_dto("Bob", "b@x.com")).await.unwrap();

        let dto = UpdateUserDto {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        };
        let err = svc.update_user_by_id(&alice.id, dto).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail));

        let stored = svc.get_user_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_update_user_same_email_and_fields() {
        let svc = service();
        let alice = svc.create_user(create_dto("Alice", "a@x.com")).await.unwrap();

        let dto = UpdateUserDto {
            name: Some("Alice Liddell".to_string()),
            email: Some("a@x.com".to_string()),
            is_email_verified: Some(true),
            ..Default::default()
        };
        let updated = svc.update_user_by_id(&alice.id, dto).await.unwrap();

        assert_eq!(updated.name, "Alice Liddell");
        assert_eq!(updated.email, "a@x.com");
        assert!(updated.is_email_verified);

        let stored = svc.get_user_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_password_rehashes() {
        let svc = service();
        let alice = svc.create_user(create_dto("Alice", "a@x.com")).await.unwrap();

        let dto = UpdateUserDto {
            password: Some("new-password9".to_string()),
            ..Default::default()
        };
        svc.update_user_by_id(&alice.id, dto).await.unwrap();

        assert!(svc.verify_credentials("a@x.com", "password1").await.unwrap().is_none());
        let user = svc
            .verify_credentials("a@x.com", "new-password9")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, alice.id);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let svc = service();
        let alice = svc.create_user(create_dto("Alice", "a@x.com")).await.unwrap();

        let deleted = svc.delete_user_by_id(&alice.id).await.unwrap();
        assert_eq!(deleted.id, alice.id);
        assert!(svc.get_user_by_id(&alice.id).await.unwrap().is_none());

        let err = svc.delete_user_by_id(&alice.id).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound));
    }

    #[tokio::test]
    async fn test_verify_credentials_unknown_email() {
        let svc = service();
        assert!(svc
            .verify_credentials("nobody@x.com", "password1")
            .await
            .unwrap()
            .is_none());
    }
}
