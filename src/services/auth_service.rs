//! Authentication service - Explicit signup and login verification.
//!
//! Uses the domain Password value object for hashing. There is no token
//! layer: login only reports whether the credentials matched.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user with an explicit email, optional username,
    /// and password. Uniqueness violations propagate to the caller.
    async fn signup(
        &self,
        email: String,
        username: Option<String>,
        password: String,
    ) -> AppResult<User>;

    /// Verify credentials. An unknown email yields `false`, never an error.
    async fn login(&self, email: String, password: String) -> AppResult<bool>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn signup(
        &self,
        email: String,
        username: Option<String>,
        password: String,
    ) -> AppResult<User> {
        let password_hash = Password::new(&password)?.into_string();

        self.users
            .create(email, username, password_hash)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AppError::conflict("user"),
                other => other,
            })
    }

    async fn login(&self, email: String, password: String) -> AppResult<bool> {
        let user = self.users.find_by_email(&email).await?;

        // Run the verification even when the user doesn't exist so response
        // timing does not reveal which emails are registered. The dummy hash
        // never matches.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let password_valid = Password::from_hash(password_hash.to_string()).verify(&password);

        Ok(user_exists && password_valid)
    }
}
