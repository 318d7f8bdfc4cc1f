//! Vocabulary word domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One saved word for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabWord {
    pub id: Uuid,
    pub word: String,
    pub meaning: Option<String>,
    pub example: Option<String>,
    pub known: bool,
    pub created_at: DateTime<Utc>,
    /// Owning user, immutable after creation
    pub user_id: Uuid,
}

/// Partial update for a word.
///
/// `None` means the field was not supplied and is left unchanged; a present
/// value is applied as-is, including an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateWord {
    pub known: Option<bool>,
    pub meaning: Option<String>,
    pub example: Option<String>,
}

impl UpdateWord {
    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.known.is_none() && self.meaning.is_none() && self.example.is_none()
    }
}

/// Word response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VocabWordResponse {
    /// Unique word identifier
    pub id: Uuid,
    /// The saved word
    #[schema(example = "serendipity")]
    pub word: String,
    /// Optional meaning text
    #[schema(example = "finding something good without looking for it")]
    pub meaning: Option<String>,
    /// Optional example sentence
    pub example: Option<String>,
    /// Whether the user marked the word as known
    pub known: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<VocabWord> for VocabWordResponse {
    fn from(word: VocabWord) -> Self {
        Self {
            id: word.id,
            word: word.word,
            meaning: word.meaning,
            example: word.example,
            known: word.known,
            created_at: word.created_at,
        }
    }
}
