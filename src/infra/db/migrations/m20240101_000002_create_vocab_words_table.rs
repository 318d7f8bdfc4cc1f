//! Migration: Create the vocab_words table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VocabWords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VocabWords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VocabWords::UserId).uuid().not_null())
                    .col(ColumnDef::new(VocabWords::Word).string().not_null())
                    .col(ColumnDef::new(VocabWords::Meaning).string_len(1000))
                    .col(ColumnDef::new(VocabWords::Example).string_len(1000))
                    .col(ColumnDef::new(VocabWords::Known).boolean().not_null())
                    .col(
                        ColumnDef::new(VocabWords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vocab_words_user")
                            .from(VocabWords::Table, VocabWords::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per (user, word); the application additionally rejects
        // case-insensitive duplicates before inserting
        manager
            .create_index(
                Index::create()
                    .name("ux_vocab_words_user_word")
                    .table(VocabWords::Table)
                    .col(VocabWords::UserId)
                    .col(VocabWords::Word)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index backing the newest-first listing per user
        manager
            .create_index(
                Index::create()
                    .name("idx_vocab_words_user_created_at")
                    .table(VocabWords::Table)
                    .col(VocabWords::UserId)
                    .col(VocabWords::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VocabWords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VocabWords {
    Table,
    Id,
    UserId,
    Word,
    Meaning,
    Example,
    Known,
    CreatedAt,
}
