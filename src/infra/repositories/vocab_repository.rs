//! Vocabulary word repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::vocab_word::{self, ActiveModel, Entity as WordEntity};
use super::map_unique_violation;
use crate::domain::{UpdateWord, VocabWord};
use crate::errors::{AppError, AppResult};

/// Vocabulary repository trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VocabRepository: Send + Sync {
    /// Find a word by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<VocabWord>>;

    /// List all words owned by a user, most recent first
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<VocabWord>>;

    /// Check whether the user already saved this word (case-insensitive)
    async fn exists_for_user(&self, user_id: Uuid, word: &str) -> AppResult<bool>;

    /// Create a new word for a user
    async fn create(
        &self,
        user_id: Uuid,
        word: String,
        meaning: Option<String>,
        example: Option<String>,
    ) -> AppResult<VocabWord>;

    /// Apply a partial update; only supplied fields change
    async fn update(&self, id: Uuid, update: UpdateWord) -> AppResult<VocabWord>;

    /// Delete a word by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of VocabRepository over SeaORM
pub struct VocabStore {
    db: DatabaseConnection,
}

impl VocabStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VocabRepository for VocabStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<VocabWord>> {
        let result = WordEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(VocabWord::from))
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<VocabWord>> {
        let models = WordEntity::find()
            .filter(vocab_word::Column::UserId.eq(user_id))
            .order_by_desc(vocab_word::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(VocabWord::from).collect())
    }

    async fn exists_for_user(&self, user_id: Uuid, word: &str) -> AppResult<bool> {
        let count = WordEntity::find()
            .filter(vocab_word::Column::UserId.eq(user_id))
            .filter(
                Expr::expr(Func::lower(Expr::col(vocab_word::Column::Word)))
                    .eq(word.to_lowercase()),
            )
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn create(
        &self,
        user_id: Uuid,
        word: String,
        meaning: Option<String>,
        example: Option<String>,
    ) -> AppResult<VocabWord> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            word: Set(word),
            meaning: Set(meaning),
            example: Set(example),
            known: Set(false),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(map_unique_violation)?;

        Ok(VocabWord::from(model))
    }

    async fn update(&self, id: Uuid, update: UpdateWord) -> AppResult<VocabWord> {
        let word = WordEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = word.into();

        if let Some(known) = update.known {
            active.known = Set(known);
        }
        if let Some(meaning) = update.meaning {
            active.meaning = Set(Some(meaning));
        }
        if let Some(example) = update.example {
            active.example = Set(Some(example));
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(VocabWord::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = WordEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
