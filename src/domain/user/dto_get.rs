use super::{User, UserRole};

pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_OFFSET: u64 = 0;

/// Equality predicate over user columns. Set fields are ANDed; an empty
/// filter matches every user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub is_email_verified: Option<bool>,
}

impl UserFilter {
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Evaluate the predicate in memory.
    pub fn matches(&self, user: &User) -> bool {
        self.name.as_ref().is_none_or(|n| *n == user.name)
            && self.email.as_ref().is_none_or(|e| *e == user.email)
            && self.role.is_none_or(|r| r == user.role)
            && self
                .is_email_verified
                .is_none_or(|v| v == user.is_email_verified)
    }
}

/// Paging and ordering options for `query_users`.
///
/// `order` uses the `field:direction[,field:direction...]` form, for
/// example `"email:desc,name:asc"`.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub order: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl QueryOptions {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(DEFAULT_OFFSET)
    }
}
