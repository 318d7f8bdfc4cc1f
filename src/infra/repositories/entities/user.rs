//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{User, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    /// Optional nickname, unique when present
    #[sea_orm(unique)]
    pub username: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub provider: String,
    pub enabled: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vocab_word::Entity")]
    VocabWord,
}

impl Related<super::vocab_word::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VocabWord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            email: model.email,
            username: model.username,
            password_hash: model.password_hash,
            role: UserRole::from(model.role.as_str()),
            provider: model.provider,
            enabled: model.enabled,
            created_at: model.created_at,
        }
    }
}
