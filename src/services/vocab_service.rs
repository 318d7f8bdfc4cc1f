//! Vocabulary service - Per-user CRUD over saved words.
//!
//! Every operation is scoped to the resolved caller identity; mutations and
//! deletions check ownership before touching the row.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{UpdateWord, User, VocabWord};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::VocabRepository;

/// Vocabulary service trait for dependency injection.
#[async_trait]
pub trait VocabService: Send + Sync {
    /// List the user's words, most recent first
    async fn list(&self, user: &User) -> AppResult<Vec<VocabWord>>;

    /// Save a new word for the user
    async fn add(
        &self,
        user: &User,
        word: String,
        meaning: Option<String>,
        example: Option<String>,
    ) -> AppResult<VocabWord>;

    /// Apply a partial update to one of the user's words
    async fn patch(&self, user: &User, id: Uuid, update: UpdateWord) -> AppResult<VocabWord>;

    /// Delete one of the user's words
    async fn delete(&self, user: &User, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of VocabService.
pub struct VocabManager {
    words: Arc<dyn VocabRepository>,
}

impl VocabManager {
    /// Create new vocabulary service instance
    pub fn new(words: Arc<dyn VocabRepository>) -> Self {
        Self { words }
    }

    /// Fetch a word and verify the caller owns it
    async fn find_owned(&self, user: &User, id: Uuid) -> AppResult<VocabWord> {
        let word = self.words.find_by_id(id).await?.ok_or_not_found()?;

        if word.user_id != user.id {
            return Err(AppError::Forbidden);
        }

        Ok(word)
    }
}

#[async_trait]
impl VocabService for VocabManager {
    async fn list(&self, user: &User) -> AppResult<Vec<VocabWord>> {
        self.words.list_by_user(user.id).await
    }

    async fn add(
        &self,
        user: &User,
        word: String,
        meaning: Option<String>,
        example: Option<String>,
    ) -> AppResult<VocabWord> {
        let word = word.trim().to_string();
        if word.is_empty() {
            return Err(AppError::bad_request("word required"));
        }

        if self.words.exists_for_user(user.id, &word).await? {
            return Err(AppError::conflict("word"));
        }

        self.words
            .create(user.id, word, meaning, example)
            .await
            .map_err(|e| match e {
                // A concurrent add of the same word can slip past the
                // existence check; the unique index reports it
                AppError::Conflict(_) => AppError::conflict("word"),
                other => other,
            })
    }

    async fn patch(&self, user: &User, id: Uuid, update: UpdateWord) -> AppResult<VocabWord> {
        let word = self.find_owned(user, id).await?;

        if update.is_empty() {
            return Ok(word);
        }

        self.words.update(id, update).await
    }

    async fn delete(&self, user: &User, id: Uuid) -> AppResult<()> {
        self.find_owned(user, id).await?;
        self.words.delete(id).await
    }
}
