use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookAssignments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BookAssignments::TenantId).uuid().not_null())
                    .col(ColumnDef::new(BookAssignments::BookId).uuid().not_null())
                    .col(ColumnDef::new(BookAssignments::ClassId).uuid().null())
                    .col(ColumnDef::new(BookAssignments::StudentUserId).uuid().null())
                    .col(
                        ColumnDef::new(BookAssignments::AssignedByUserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BookAssignments::DueDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BookAssignments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BookAssignments::Table, BookAssignments::TenantId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BookAssignments::Table, BookAssignments::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BookAssignments::Table, BookAssignments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BookAssignments::Table, BookAssignments::StudentUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookAssignments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum BookAssignments {
    Table,
    Id,
    TenantId,
    BookId,
    ClassId,
    StudentUserId,
    AssignedByUserId,
    DueDate,
    CreatedAt,
}

#[derive(Iden)]
enum Schools {
    Table,
    Id,
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
