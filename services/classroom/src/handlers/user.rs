use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pagewise_auth_types::identity::Identity;
use pagewise_domain::pagination::PageRequest;
use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::{ADMINS, UserRole};

use crate::domain::types::User;
use crate::error::ClassroomError;
use crate::handlers::require_role;
use crate::state::AppState;
use crate::usecase::user::{
    GetMeUseCase, ListUsersUseCase, RegisterInput, RegisterUseCase, UpdateProfileUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub tenant_id: Option<Uuid>,
    pub profile: Option<serde_json::Value>,
}

impl From<User> for UserProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            tenant_id: user.tenant_id,
            profile: user.profile,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub tenant_id: Option<Uuid>,
    #[serde(serialize_with = "pagewise_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// ── POST /account/register ───────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub role: UserRole,
    pub tenant_id: Option<Uuid>,
}

/// Pre-authentication registration. The tenant comes from the request scope
/// (`X-Tenant-ID`) or, when the request is unscoped, from the body.
pub async fn register(
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfileResponse>), ClassroomError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        schools: state.school_repo(),
    };
    let user = usecase
        .execute(
            scope,
            RegisterInput {
                email: body.email,
                role: body.role,
                tenant_id: body.tenant_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
) -> Result<Json<UserProfileResponse>, ClassroomError> {
    let scope = scope.authorize(identity.role)?;
    let usecase = GetMeUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(scope, identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── PUT /users/me ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub profile: Option<serde_json::Value>,
}

pub async fn update_me(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfileResponse>, ClassroomError> {
    let scope = scope.authorize(identity.role)?;
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(scope, identity.user_id, body.profile)
        .await?;
    Ok(Json(user.into()))
}

// ── GET /users ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct UserListQuery {
    pub role: Option<UserRole>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserListResponse>>, ClassroomError> {
    require_role(&identity, ADMINS)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase
        .execute(
            scope,
            query.role,
            PageRequest::from_query(query.per_page, query.page),
        )
        .await?;
    Ok(Json(
        users
            .into_iter()
            .map(|u| UserListResponse {
                id: u.id,
                email: u.email,
                role: u.role,
                tenant_id: u.tenant_id,
                created_at: u.created_at,
            })
            .collect(),
    ))
}
