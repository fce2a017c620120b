use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::debug;

use crate::domain::{
    DomainError, DomainResult, NewUser, PublicUser, SortDirection, SortField, SortSpec, User,
    UserChanges, UserFilter, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::entities::user;
use crate::shared::PaginatedResult;

/// SeaORM-backed user store.
///
/// Email uniqueness is enforced by the `users.email` unique index; a
/// violation on insert or update surfaces as `DomainError::DuplicateEmail`.
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::User => UserRole::User,
        user::UserRole::Admin => UserRole::Admin,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::User => user::UserRole::User,
        UserRole::Admin => user::UserRole::Admin,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        is_email_verified: model.is_email_verified,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn public_model_to_domain(model: user::PublicModel) -> PublicUser {
    PublicUser {
        id: model.id,
        name: model.name,
        email: model.email,
        role: entity_role_to_domain(model.role),
        is_email_verified: model.is_email_verified,
    }
}

fn sort_column(field: SortField) -> user::Column {
    match field {
        SortField::Id => user::Column::Id,
        SortField::Name => user::Column::Name,
        SortField::Email => user::Column::Email,
        SortField::Role => user::Column::Role,
        SortField::IsEmailVerified => user::Column::IsEmailVerified,
        SortField::CreatedAt => user::Column::CreatedAt,
        SortField::UpdatedAt => user::Column::UpdatedAt,
    }
}

fn sort_order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

fn filter_condition(filter: &UserFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(ref name) = filter.name {
        cond = cond.add(user::Column::Name.eq(name.as_str()));
    }
    if let Some(ref email) = filter.email {
        cond = cond.add(user::Column::Email.eq(email.as_str()));
    }
    if let Some(role) = filter.role {
        cond = cond.add(user::Column::Role.eq(domain_role_to_entity(role)));
    }
    if let Some(verified) = filter.is_email_verified {
        cond = cond.add(user::Column::IsEmailVerified.eq(verified));
    }
    cond
}

fn write_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::DuplicateEmail,
        _ => DomainError::Database(e),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn count(&self, filter: &UserFilter) -> DomainResult<u64> {
        let total = user::Entity::find()
            .filter(filter_condition(filter))
            .count(&self.db)
            .await?;
        Ok(total)
    }

    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let now = Utc::now();

        let model = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            role: Set(domain_role_to_entity(new_user.role)),
            is_email_verified: Set(new_user.is_email_verified),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(write_err)?;
        Ok(user_model_to_domain(inserted))
    }

    async fn find_and_count_all(
        &self,
        filter: &UserFilter,
        sort: &[SortSpec],
        limit: u64,
        offset: u64,
    ) -> DomainResult<PaginatedResult<PublicUser>> {
        let mut query = user::Entity::find().filter(filter_condition(filter));

        // Count before paging
        let total = query.clone().count(&self.db).await?;

        for spec in sort {
            query = query.order_by(sort_column(spec.field), sort_order(spec.direction));
        }

        let rows = query
            .offset(offset)
            .limit(limit)
            .into_partial_model::<user::PublicModel>()
            .all(&self.db)
            .await?;

        debug!(total, returned = rows.len(), limit, offset, "User page fetched");

        let rows = rows.into_iter().map(public_model_to_domain).collect();
        Ok(PaginatedResult::new(rows, total, limit, offset))
    }

    async fn find_by_pk(&self, id: &str) -> DomainResult<Option<PublicUser>> {
        let model = user::Entity::find_by_id(id)
            .into_partial_model::<user::PublicModel>()
            .one(&self.db)
            .await?;

        Ok(model.map(public_model_to_domain))
    }

    async fn find_one(&self, filter: &UserFilter) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(filter_condition(filter))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn update(&self, id: &str, changes: UserChanges) -> DomainResult<u64> {
        let mut active = user::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(role) = changes.role {
            active.role = Set(domain_role_to_entity(role));
        }
        if let Some(verified) = changes.is_email_verified {
            active.is_email_verified = Set(verified);
        }

        let result = user::Entity::update_many()
            .set(active)
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(write_err)?;

        Ok(result.rows_affected)
    }

    async fn destroy(&self, id: &str) -> DomainResult<u64> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
