use sea_orm::entity::prelude::*;

/// Platform user. `tenant_id` is null for platform admins.
///
/// Unique on `(tenant_id, email)`; among null-tenant rows `email` is unique on
/// its own (partial index).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub email: String,
    pub role: String,
    pub profile: Option<Json>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::TenantId",
        to = "super::schools::Column::Id"
    )]
    School,
    #[sea_orm(has_many = "super::reading_progress::Entity")]
    ReadingProgress,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::reading_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
