//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod user_repository;
mod vocab_repository;

pub use user_repository::{UserRepository, UserStore};
pub use vocab_repository::{VocabRepository, VocabStore};

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use vocab_repository::MockVocabRepository;

use sea_orm::{DbErr, SqlErr};

use crate::errors::AppError;

/// Map an insert error to `Conflict` when it is a uniqueness violation.
///
/// The conflict message carries the backend's constraint detail so callers
/// absorbing a race can still surface the cause when the re-read comes up
/// empty.
pub(crate) fn map_unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => AppError::Conflict(detail),
        _ => AppError::from(err),
    }
}
