use sea_orm_migration::prelude::*;

mod m20260901_000001_create_schools;
mod m20260901_000002_create_users;
mod m20260901_000003_create_classes;
mod m20260901_000004_create_student_profiles;
mod m20260901_000005_create_books;
mod m20260901_000006_create_book_pages;
mod m20260901_000007_create_book_assignments;
mod m20260901_000008_create_reading_progress;
mod m20260901_000009_add_tenant_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_schools::Migration),
            Box::new(m20260901_000002_create_users::Migration),
            Box::new(m20260901_000003_create_classes::Migration),
            Box::new(m20260901_000004_create_student_profiles::Migration),
            Box::new(m20260901_000005_create_books::Migration),
            Box::new(m20260901_000006_create_book_pages::Migration),
            Box::new(m20260901_000007_create_book_assignments::Migration),
            Box::new(m20260901_000008_create_reading_progress::Migration),
            Box::new(m20260901_000009_add_tenant_indexes::Migration),
        ]
    }
}
