//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::map_unique_violation;
use crate::config::{PROVIDER_LOCAL, ROLE_USER};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// User repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Check whether a username is already taken
    async fn exists_by_username(&self, username: &str) -> AppResult<bool>;

    /// Create a new user.
    ///
    /// A uniqueness violation (email or username) surfaces as
    /// [`AppError::Conflict`]; the caller decides whether to absorb it.
    async fn create(
        &self,
        email: String,
        username: Option<String>,
        password_hash: String,
    ) -> AppResult<User>;
}

/// Concrete implementation of UserRepository over SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn create(
        &self,
        email: String,
        username: Option<String>,
        password_hash: String,
    ) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            username: Set(username),
            password_hash: Set(password_hash),
            role: Set(ROLE_USER.to_string()),
            provider: Set(PROVIDER_LOCAL.to_string()),
            enabled: Set(true),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(map_unique_violation)?;

        Ok(User::from(model))
    }
}
