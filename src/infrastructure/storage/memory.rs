//! In-memory user store

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, NewUser, PublicUser, SortSpec, User, UserChanges, UserFilter,
    UserRepositoryInterface,
};
use crate::shared::PaginatedResult;

/// In-memory user store for development and testing.
///
/// `emails` indexes email → user id and plays the role of the unique
/// constraint: a slot is claimed under the shard lock before the user
/// row is written.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
    emails: DashMap<String, String>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Drop every stored user.
    pub fn clear(&self) {
        self.users.clear();
        self.emails.clear();
    }

    fn claim_email(&self, email: &str, id: &str) -> DomainResult<()> {
        match self.emails.entry(email.to_string()) {
            Entry::Occupied(slot) if slot.get() != id => Err(DomainError::DuplicateEmail),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(id.to_string());
                Ok(())
            }
        }
    }

    fn matching(&self, filter: &UserFilter) -> Vec<User> {
        self.users
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn count(&self, filter: &UserFilter) -> DomainResult<u64> {
        Ok(self.matching(filter).len() as u64)
    }

    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        self.claim_email(&new_user.email, &id)?;

        let user = User {
            id: id.clone(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_email_verified: new_user.is_email_verified,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_and_count_all(
        &self,
        filter: &UserFilter,
        sort: &[SortSpec],
        limit: u64,
        offset: u64,
    ) -> DomainResult<PaginatedResult<PublicUser>> {
        let mut users = self.matching(filter);
        let total = users.len() as u64;

        // Insertion order breaks ties, like an unordered table scan
        users.sort_by(|a, b| {
            sort.iter()
                .fold(std::cmp::Ordering::Equal, |ord, spec| {
                    ord.then_with(|| spec.compare(a, b))
                })
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });

        let rows = users
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(PublicUser::from)
            .collect();

        Ok(PaginatedResult::new(rows, total, limit, offset))
    }

    async fn find_by_pk(&self, id: &str) -> DomainResult<Option<PublicUser>> {
        Ok(self.users.get(id).map(|u| PublicUser::from(u.value().clone())))
    }

    async fn find_one(&self, filter: &UserFilter) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone()))
    }

    async fn update(&self, id: &str, changes: UserChanges) -> DomainResult<u64> {
        // The row guard is held while the email slot moves, so destroy
        // cannot interleave. Lock order: users, then emails.
        let Some(mut user) = self.users.get_mut(id) else {
            return Ok(0);
        };

        if let Some(ref email) = changes.email {
            if *email != user.email {
                self.claim_email(email, id)?;
                self.emails.remove(&user.email);
            }
        }

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(verified) = changes.is_email_verified {
            user.is_email_verified = verified;
        }
        user.updated_at = Utc::now();

        Ok(1)
    }

    async fn destroy(&self, id: &str) -> DomainResult<u64> {
        match self.users.remove(id) {
            Some((_, user)) => {
                self.emails.remove(&user.email);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
