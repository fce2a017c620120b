use super::UserRole;

/// Input for creating a user. `password` is plain text and gets hashed
/// by the service before it reaches the store.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
    pub is_email_verified: Option<bool>,
}

/// Record handed to the store on insert. The store assigns `id`,
/// `created_at` and `updated_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_email_verified: bool,
}
