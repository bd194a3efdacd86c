use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pagewise_auth_types::identity::Identity;
use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::{ADMINS, STAFF};

use crate::domain::types::{ClassChanges, ClassWithCount};
use crate::error::ClassroomError;
use crate::handlers::require_role;
use crate::state::AppState;
use crate::usecase::class::{
    CreateClassInput, CreateClassUseCase, DeleteClassUseCase, GetClassUseCase,
    ListClassesUseCase, UpdateClassUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassResponse {
    pub id: Uuid,
    pub name: String,
    pub grade_level: i32,
    pub teacher_id: Uuid,
    pub student_count: u64,
    #[serde(serialize_with = "pagewise_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ClassWithCount> for ClassResponse {
    fn from(c: ClassWithCount) -> Self {
        Self {
            id: c.class.id,
            name: c.class.name,
            grade_level: c.class.grade_level,
            teacher_id: c.class.teacher_id,
            student_count: c.student_count,
            created_at: c.class.created_at,
        }
    }
}

// ── GET /classes ─────────────────────────────────────────────────────────────

pub async fn list_classes(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
) -> Result<Json<Vec<ClassResponse>>, ClassroomError> {
    require_role(&identity, STAFF)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = ListClassesUseCase {
        repo: state.class_repo(),
    };
    let classes = usecase.execute(scope).await?;
    Ok(Json(classes.into_iter().map(ClassResponse::from).collect()))
}

// ── GET /classes/{id} ────────────────────────────────────────────────────────

pub async fn get_class(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClassResponse>, ClassroomError> {
    require_role(&identity, STAFF)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = GetClassUseCase {
        repo: state.class_repo(),
    };
    Ok(Json(usecase.execute(scope, id).await?.into()))
}

// ── POST /classes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub name: String,
    pub grade_level: i32,
    pub teacher_id: Uuid,
}

pub async fn create_class(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Json(body): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassResponse>), ClassroomError> {
    require_role(&identity, ADMINS)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = CreateClassUseCase {
        classes: state.class_repo(),
        users: state.user_repo(),
    };
    let class = usecase
        .execute(
            scope,
            CreateClassInput {
                name: body.name,
                grade_level: body.grade_level,
                teacher_id: body.teacher_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(class.into())))
}

// ── PUT /classes/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub grade_level: Option<i32>,
    pub teacher_id: Option<Uuid>,
}

pub async fn update_class(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateClassRequest>,
) -> Result<Json<ClassResponse>, ClassroomError> {
    require_role(&identity, ADMINS)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = UpdateClassUseCase {
        classes: state.class_repo(),
        users: state.user_repo(),
    };
    let class = usecase
        .execute(
            scope,
            id,
            ClassChanges {
                name: body.name,
                grade_level: body.grade_level,
                teacher_id: body.teacher_id,
            },
        )
        .await?;
    Ok(Json(class.into()))
}

// ── DELETE /classes/{id} ─────────────────────────────────────────────────────

pub async fn delete_class(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ClassroomError> {
    require_role(&identity, ADMINS)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = DeleteClassUseCase {
        repo: state.class_repo(),
    };
    usecase.execute(scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
