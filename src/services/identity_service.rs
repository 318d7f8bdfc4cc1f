//! Identity resolution service - Maps a caller email to a user record.
//!
//! Vocabulary requests are authenticated by a plaintext email header only,
//! so the first contact from an unknown email provisions a user record on
//! the fly: generated unique username, random unusable placeholder password.
//! Two concurrent first contacts may race to insert the same email; the
//! store's unique constraint decides the winner and the loser re-reads.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{FALLBACK_USERNAME, PLACEHOLDER_PASSWORD_PREFIX, USERNAME_MAX_LENGTH};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

static USERNAME_SANITIZER: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^A-Za-z0-9_-]").expect("username sanitizer pattern is valid"));

/// Identity resolution trait for dependency injection.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolve an email to its user record, provisioning one if absent.
    async fn resolve(&self, email: &str) -> AppResult<User>;

    /// Resolve an email to its user record, reporting whether this call
    /// created it. Repeated calls with the same email converge to one user.
    async fn get_or_create(&self, email: &str) -> AppResult<(User, bool)>;
}

/// Concrete implementation of IdentityService.
pub struct IdentityResolver {
    users: Arc<dyn UserRepository>,
}

impl IdentityResolver {
    /// Create new resolver instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Pick a username no other user has: the candidate base, then
    /// `base-2`, `base-3`, ... with the base cut so the result stays
    /// within [`USERNAME_MAX_LENGTH`].
    async fn unique_username(&self, email: &str) -> AppResult<String> {
        let base = candidate_base(email);
        let mut candidate = base.clone();
        let mut n: u32 = 2;

        while self.users.exists_by_username(&candidate).await? {
            let suffix = format!("-{}", n);
            let keep = USERNAME_MAX_LENGTH.saturating_sub(suffix.len());
            candidate = format!("{}{}", &base[..base.len().min(keep)], suffix);
            n += 1;
        }

        Ok(candidate)
    }
}

/// Derive a username candidate from the email's local part.
///
/// Characters outside `[A-Za-z0-9_-]` become `-`; an empty result falls
/// back to [`FALLBACK_USERNAME`]; the candidate is capped at
/// [`USERNAME_MAX_LENGTH`] characters.
fn candidate_base(email: &str) -> String {
    let local = match email.find('@') {
        Some(idx) => &email[..idx],
        None => email,
    };

    let mut base = USERNAME_SANITIZER.replace_all(local, "-").into_owned();
    if base.is_empty() {
        base = FALLBACK_USERNAME.to_string();
    }
    base.truncate(USERNAME_MAX_LENGTH);
    base
}

#[async_trait]
impl IdentityService for IdentityResolver {
    async fn resolve(&self, email: &str) -> AppResult<User> {
        let (user, _created) = self.get_or_create(email).await?;
        Ok(user)
    }

    async fn get_or_create(&self, email: &str) -> AppResult<(User, bool)> {
        if let Some(user) = self.users.find_by_email(email).await? {
            return Ok((user, false));
        }

        let username = self.unique_username(email).await?;

        // Placeholder digest: random, never intended for login
        let placeholder = format!("{}{}", PLACEHOLDER_PASSWORD_PREFIX, Uuid::new_v4());
        let password_hash = Password::new(&placeholder)?.into_string();

        match self
            .users
            .create(email.to_string(), Some(username), password_hash)
            .await
        {
            Ok(user) => {
                tracing::info!("provisioned user for email={}", email);
                Ok((user, true))
            }
            // A concurrent resolver may have won the insert race for this
            // email; the re-read settles it
            Err(AppError::Conflict(cause)) => match self.users.find_by_email(email).await? {
                Some(user) => {
                    tracing::debug!("lost provisioning race for email={}", email);
                    Ok((user, false))
                }
                None => {
                    tracing::error!("failed to create user for email={}: {}", email, cause);
                    Err(AppError::provisioning(cause))
                }
            },
            Err(e) => Err(e),
        }
    }
}
