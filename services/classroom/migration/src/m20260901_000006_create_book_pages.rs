use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookPages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BookPages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BookPages::BookId).uuid().not_null())
                    .col(ColumnDef::new(BookPages::PageNumber).integer().not_null())
                    .col(ColumnDef::new(BookPages::NarrationText).text().null())
                    .col(ColumnDef::new(BookPages::NarrationAudioUrl).string().null())
                    .col(ColumnDef::new(BookPages::AssetUrl).string().null())
                    .col(
                        ColumnDef::new(BookPages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BookPages::Table, BookPages::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(BookPages::Table)
                    .col(BookPages::BookId)
                    .col(BookPages::PageNumber)
                    .unique()
                    .name("uq_book_pages_book_id_page_number")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookPages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum BookPages {
    Table,
    Id,
    BookId,
    PageNumber,
    NarrationText,
    NarrationAudioUrl,
    AssetUrl,
    CreatedAt,
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
}
