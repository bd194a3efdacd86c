use sea_orm::entity::prelude::*;

/// Shared catalog book. Not tenant-owned.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub language: String,
    pub description: Option<String>,
    pub status: String,
    pub page_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book_pages::Entity")]
    BookPages,
    #[sea_orm(has_many = "super::reading_progress::Entity")]
    ReadingProgress,
}

impl Related<super::book_pages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookPages.def()
    }
}

impl Related<super::reading_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
