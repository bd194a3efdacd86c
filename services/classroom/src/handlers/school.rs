use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pagewise_auth_types::identity::Identity;
use pagewise_domain::user::UserRole;

use crate::domain::types::School;
use crate::error::ClassroomError;
use crate::handlers::require_role;
use crate::state::AppState;
use crate::usecase::school::{
    CreateSchoolInput, CreateSchoolUseCase, DeleteSchoolUseCase, ListSchoolsUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolResponse {
    pub id: Uuid,
    pub name: String,
    pub subdomain: String,
    #[serde(serialize_with = "pagewise_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<School> for SchoolResponse {
    fn from(school: School) -> Self {
        Self {
            id: school.id,
            name: school.name,
            subdomain: school.subdomain,
            created_at: school.created_at,
        }
    }
}

// ── GET /management/schools ──────────────────────────────────────────────────

pub async fn list_schools(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<SchoolResponse>>, ClassroomError> {
    require_role(&identity, &[UserRole::PlatformAdmin])?;
    let usecase = ListSchoolsUseCase {
        repo: state.school_repo(),
    };
    let schools = usecase.execute().await?;
    Ok(Json(schools.into_iter().map(SchoolResponse::from).collect()))
}

// ── POST /management/schools ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchoolRequest {
    pub name: String,
    pub subdomain: Option<String>,
    pub admin_email: String,
}

pub async fn create_school(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateSchoolRequest>,
) -> Result<(StatusCode, Json<SchoolResponse>), ClassroomError> {
    require_role(&identity, &[UserRole::PlatformAdmin])?;
    let usecase = CreateSchoolUseCase {
        repo: state.school_repo(),
    };
    let school = usecase
        .execute(CreateSchoolInput {
            name: body.name,
            subdomain: body.subdomain,
            admin_email: body.admin_email,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(school.into())))
}

// ── DELETE /management/schools/{id} ──────────────────────────────────────────

pub async fn delete_school(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ClassroomError> {
    require_role(&identity, &[UserRole::PlatformAdmin])?;
    let usecase = DeleteSchoolUseCase {
        repo: state.school_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
