use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const TENANT_INDEXES: [(&str, &str); 4] = [
    ("classes", "idx_classes_tenant_id"),
    ("student_profiles", "idx_student_profiles_tenant_id"),
    ("book_assignments", "idx_book_assignments_tenant_id"),
    ("reading_progress", "idx_reading_progress_tenant_id"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, name) in TENANT_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .table(Alias::new(table))
                        .col(Alias::new("tenant_id"))
                        .name(name)
                        .to_owned(),
                )
                .await?;
        }
        // (tenant_id, email) does not constrain null-tenant rows.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uq_users_platform_email ON users (email) WHERE tenant_id IS NULL",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS uq_users_platform_email")
            .await?;
        for (_, name) in TENANT_INDEXES {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}
