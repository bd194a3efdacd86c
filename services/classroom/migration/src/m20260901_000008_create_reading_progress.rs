use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReadingProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReadingProgress::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReadingProgress::TenantId).uuid().not_null())
                    .col(ColumnDef::new(ReadingProgress::UserId).uuid().not_null())
                    .col(ColumnDef::new(ReadingProgress::BookId).uuid().not_null())
                    .col(
                        ColumnDef::new(ReadingProgress::CurrentPage)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReadingProgress::TotalPages)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReadingProgress::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ReadingProgress::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ReadingProgress::ReadingTimeSeconds)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReadingProgress::InteractionCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReadingProgress::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ReadingProgress::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReadingProgress::Table, ReadingProgress::TenantId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReadingProgress::Table, ReadingProgress::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReadingProgress::Table, ReadingProgress::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ReadingProgress::Table)
                    .col(ReadingProgress::UserId)
                    .col(ReadingProgress::BookId)
                    .unique()
                    .name("uq_reading_progress_user_id_book_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReadingProgress::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ReadingProgress {
    Table,
    Id,
    TenantId,
    UserId,
    BookId,
    CurrentPage,
    TotalPages,
    IsCompleted,
    CompletedAt,
    ReadingTimeSeconds,
    InteractionCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Schools {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
}
