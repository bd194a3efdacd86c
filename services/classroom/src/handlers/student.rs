use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pagewise_auth_types::identity::Identity;
use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::STAFF;

use crate::domain::types::StudentProfile;
use crate::error::ClassroomError;
use crate::handlers::require_role;
use crate::state::AppState;
use crate::usecase::student::{
    CreateStudentInput, CreateStudentUseCase, GetStudentUseCase, ListStudentsUseCase,
    UpdateStudentInput, UpdateStudentUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub class_id: Option<Uuid>,
    pub parent_user_id: Option<Uuid>,
    pub total_books_read: i32,
    pub total_reading_time_seconds: i64,
    #[serde(serialize_with = "pagewise_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<StudentProfile> for StudentResponse {
    fn from(p: StudentProfile) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            display_name: p.display_name,
            class_id: p.class_id,
            parent_user_id: p.parent_user_id,
            total_books_read: p.total_books_read,
            total_reading_time_seconds: p.total_reading_time_seconds,
            created_at: p.created_at,
        }
    }
}

// ── GET /students ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StudentListQuery {
    pub class_id: Option<Uuid>,
}

pub async fn list_students(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Query(query): Query<StudentListQuery>,
) -> Result<Json<Vec<StudentResponse>>, ClassroomError> {
    require_role(&identity, STAFF)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = ListStudentsUseCase {
        repo: state.student_repo(),
    };
    let students = usecase.execute(scope, query.class_id).await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

// ── GET /students/{id} ───────────────────────────────────────────────────────

pub async fn get_student(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentResponse>, ClassroomError> {
    require_role(&identity, STAFF)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = GetStudentUseCase {
        repo: state.student_repo(),
    };
    Ok(Json(usecase.execute(scope, id).await?.into()))
}

// ── POST /students ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub email: String,
    pub display_name: String,
    pub class_id: Option<Uuid>,
    pub parent_user_id: Option<Uuid>,
}

pub async fn create_student(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Json(body): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ClassroomError> {
    require_role(&identity, STAFF)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = CreateStudentUseCase {
        students: state.student_repo(),
        classes: state.class_repo(),
        users: state.user_repo(),
    };
    let profile = usecase
        .execute(
            scope,
            CreateStudentInput {
                email: body.email,
                display_name: body.display_name,
                class_id: body.class_id,
                parent_user_id: body.parent_user_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

// ── PUT /students/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub display_name: String,
    pub class_id: Option<Uuid>,
}

pub async fn update_student(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStudentRequest>,
) -> Result<Json<StudentResponse>, ClassroomError> {
    require_role(&identity, STAFF)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = UpdateStudentUseCase {
        students: state.student_repo(),
        classes: state.class_repo(),
    };
    let profile = usecase
        .execute(
            scope,
            id,
            UpdateStudentInput {
                display_name: body.display_name,
                class_id: body.class_id,
            },
        )
        .await?;
    Ok(Json(profile.into()))
}
