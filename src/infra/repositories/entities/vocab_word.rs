//! Vocabulary word database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::VocabWord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vocab_words")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub word: String,
    pub meaning: Option<String>,
    pub example: Option<String>,
    pub known: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for VocabWord {
    fn from(model: Model) -> Self {
        VocabWord {
            id: model.id,
            word: model.word,
            meaning: model.meaning,
            example: model.example,
            known: model.known,
            created_at: model.created_at,
            user_id: model.user_id,
        }
    }
}
