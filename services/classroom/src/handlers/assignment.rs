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

use crate::domain::types::BookAssignment;
use crate::error::ClassroomError;
use crate::handlers::require_role;
use crate::state::AppState;
use crate::usecase::assignment::{
    CreateAssignmentInput, CreateAssignmentUseCase, DeleteAssignmentUseCase,
    ListAssignmentsUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub class_id: Option<Uuid>,
    pub student_user_id: Option<Uuid>,
    pub assigned_by_user_id: Uuid,
    #[serde(serialize_with = "pagewise_core::serde::to_rfc3339_ms_opt")]
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "pagewise_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<BookAssignment> for AssignmentResponse {
    fn from(a: BookAssignment) -> Self {
        Self {
            id: a.id,
            book_id: a.book_id,
            class_id: a.class_id,
            student_user_id: a.student_user_id,
            assigned_by_user_id: a.assigned_by_user_id,
            due_date: a.due_date,
            created_at: a.created_at,
        }
    }
}

// ── GET /assignments ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentListQuery {
    pub class_id: Option<Uuid>,
}

pub async fn list_assignments(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Query(query): Query<AssignmentListQuery>,
) -> Result<Json<Vec<AssignmentResponse>>, ClassroomError> {
    let scope = scope.authorize(identity.role)?;
    let usecase = ListAssignmentsUseCase {
        repo: state.assignment_repo(),
    };
    let assignments = usecase.execute(scope, query.class_id).await?;
    Ok(Json(
        assignments
            .into_iter()
            .map(AssignmentResponse::from)
            .collect(),
    ))
}

// ── POST /assignments ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub book_id: Uuid,
    pub class_id: Option<Uuid>,
    pub student_user_id: Option<Uuid>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}

pub async fn create_assignment(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Json(body): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), ClassroomError> {
    require_role(&identity, STAFF)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = CreateAssignmentUseCase {
        assignments: state.assignment_repo(),
        books: state.book_repo(),
        classes: state.class_repo(),
        users: state.user_repo(),
    };
    let assignment = usecase
        .execute(
            scope,
            identity.user_id,
            CreateAssignmentInput {
                book_id: body.book_id,
                class_id: body.class_id,
                student_user_id: body.student_user_id,
                due_date: body.due_date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(assignment.into())))
}

// ── DELETE /assignments/{id} ─────────────────────────────────────────────────

pub async fn delete_assignment(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ClassroomError> {
    require_role(&identity, STAFF)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = DeleteAssignmentUseCase {
        repo: state.assignment_repo(),
    };
    usecase.execute(scope, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
