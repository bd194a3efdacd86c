use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pagewise_auth_types::identity::Identity;
use pagewise_domain::pagination::PageRequest;
use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::STAFF;

use crate::domain::types::{ProgressEvent, ProgressSortBy, ProgressView};
use crate::error::ClassroomError;
use crate::handlers::require_role;
use crate::state::AppState;
use crate::usecase::progress::{
    GetProgressUseCase, ListProgressUseCase, ProgressAnalyticsUseCase, RecordProgressUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_title: Option<String>,
    pub current_page: i32,
    pub total_pages: i32,
    pub is_completed: bool,
    #[serde(serialize_with = "pagewise_core::serde::to_rfc3339_ms_opt")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub reading_time_seconds: i64,
    pub interaction_count: i64,
    #[serde(serialize_with = "pagewise_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "pagewise_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProgressView> for ProgressResponse {
    fn from(view: ProgressView) -> Self {
        let p = view.progress;
        Self {
            id: p.id,
            book_id: p.book_id,
            book_title: view.book_title,
            current_page: p.current_page,
            total_pages: p.total_pages,
            is_completed: p.is_completed,
            completed_at: p.completed_at,
            reading_time_seconds: p.reading_time_seconds,
            interaction_count: p.interaction_count,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_books_read: u64,
    pub total_books_in_progress: u64,
    pub total_reading_time_seconds: i64,
    pub total_interactions: i64,
    /// Percent of tracked books completed, 0 when nothing is tracked.
    pub completion_rate: f64,
    pub recent_activity: Vec<ProgressResponse>,
}

// ── POST /progress ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordProgressRequest {
    pub book_id: Uuid,
    pub current_page: i32,
    pub total_pages: i32,
    #[serde(default)]
    pub reading_time_seconds: i64,
    #[serde(default)]
    pub interaction_count: i64,
    #[serde(default)]
    pub is_completed: bool,
}

pub async fn record_progress(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Json(body): Json<RecordProgressRequest>,
) -> Result<Json<ProgressResponse>, ClassroomError> {
    let scope = scope.authorize(identity.role)?;
    let usecase = RecordProgressUseCase {
        progress: state.progress_repo(),
        users: state.user_repo(),
        books: state.book_repo(),
    };
    let view = usecase
        .execute(
            scope,
            identity.user_id,
            ProgressEvent {
                book_id: body.book_id,
                current_page: body.current_page,
                total_pages: body.total_pages,
                reading_time_seconds: body.reading_time_seconds,
                interaction_count: body.interaction_count,
                is_completed: body.is_completed,
            },
        )
        .await?;
    Ok(Json(view.into()))
}

// ── GET /progress ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ProgressListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub sort_by: Option<String>,
}

pub async fn list_progress(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Query(query): Query<ProgressListQuery>,
) -> Result<Json<Vec<ProgressResponse>>, ClassroomError> {
    let scope = scope.authorize(identity.role)?;
    let sort_by = match query.sort_by.as_deref() {
        Some(s) => ProgressSortBy::from_kebab_case(s).ok_or(ClassroomError::MissingData)?,
        None => ProgressSortBy::default(),
    };
    let page = PageRequest::from_query(query.per_page, query.page);

    let usecase = ListProgressUseCase {
        repo: state.progress_repo(),
    };
    let rows = usecase
        .execute(scope, identity.user_id, sort_by, page)
        .await?;
    Ok(Json(rows.into_iter().map(ProgressResponse::from).collect()))
}

// ── GET /progress/{book_id} ──────────────────────────────────────────────────

pub async fn get_progress(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<ProgressResponse>, ClassroomError> {
    let scope = scope.authorize(identity.role)?;
    let usecase = GetProgressUseCase {
        repo: state.progress_repo(),
    };
    let view = usecase.execute(scope, identity.user_id, book_id).await?;
    Ok(Json(view.into()))
}

// ── GET /progress/analytics ──────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub student_id: Option<Uuid>,
}

pub async fn progress_analytics(
    identity: Identity,
    State(state): State<AppState>,
    Extension(scope): Extension<TenantScope>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, ClassroomError> {
    require_role(&identity, STAFF)?;
    let scope = scope.authorize(identity.role)?;
    let usecase = ProgressAnalyticsUseCase {
        repo: state.progress_repo(),
    };
    let summary = usecase.execute(scope, query.student_id).await?;
    Ok(Json(AnalyticsResponse {
        total_books_read: summary.totals.completed,
        total_books_in_progress: summary.totals.in_progress,
        total_reading_time_seconds: summary.totals.reading_time_seconds,
        total_interactions: summary.totals.interaction_count,
        completion_rate: summary.totals.completion_rate(),
        recent_activity: summary
            .recent
            .into_iter()
            .map(ProgressResponse::from)
            .collect(),
    }))
}
