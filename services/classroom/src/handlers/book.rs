use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pagewise_auth_types::identity::Identity;
use pagewise_domain::book::BookStatus;
use pagewise_domain::pagination::PageRequest;
use pagewise_domain::user::{ADMINS, UserRole};

use crate::domain::types::{Book, BookPage};
use crate::error::ClassroomError;
use crate::handlers::require_role;
use crate::state::AppState;
use crate::usecase::book::{
    AddPageInput, AddPageUseCase, CreateBookInput, CreateBookUseCase, DeleteBookUseCase,
    DeletePageUseCase, GetBookUseCase, ListBooksUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub language: String,
    pub description: Option<String>,
    pub status: BookStatus,
    pub page_count: i32,
    #[serde(serialize_with = "pagewise_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Book> for BookResponse {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
            author: b.author,
            language: b.language,
            description: b.description,
            status: b.status,
            page_count: b.page_count,
            created_at: b.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub id: Uuid,
    pub page_number: i32,
    pub narration_text: Option<String>,
    pub narration_audio_url: Option<String>,
    pub asset_url: Option<String>,
}

impl From<BookPage> for PageResponse {
    fn from(p: BookPage) -> Self {
        Self {
            id: p.id,
            page_number: p.page_number,
            narration_text: p.narration_text,
            narration_audio_url: p.narration_audio_url,
            asset_url: p.asset_url,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailResponse {
    #[serde(flatten)]
    pub book: BookResponse,
    pub pages: Vec<PageResponse>,
}

// ── GET /books ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BookListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_books(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<BookListQuery>,
) -> Result<Json<Vec<BookResponse>>, ClassroomError> {
    let usecase = ListBooksUseCase {
        repo: state.book_repo(),
    };
    let books = usecase
        .execute(PageRequest::from_query(query.per_page, query.page))
        .await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

// ── GET /books/{id} ──────────────────────────────────────────────────────────

pub async fn get_book(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookDetailResponse>, ClassroomError> {
    let usecase = GetBookUseCase {
        repo: state.book_repo(),
    };
    let detail = usecase.execute(id).await?;
    Ok(Json(BookDetailResponse {
        book: detail.book.into(),
        pages: detail.pages.into_iter().map(PageResponse::from).collect(),
    }))
}

// ── POST /books ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: String,
    pub author: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub status: Option<BookStatus>,
}

pub async fn create_book(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ClassroomError> {
    require_role(&identity, ADMINS)?;
    let usecase = CreateBookUseCase {
        repo: state.book_repo(),
    };
    let book = usecase
        .execute(CreateBookInput {
            title: body.title,
            author: body.author,
            language: body.language,
            description: body.description,
            status: body.status,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

// ── DELETE /books/{id} ───────────────────────────────────────────────────────

pub async fn delete_book(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ClassroomError> {
    require_role(&identity, &[UserRole::PlatformAdmin])?;
    let usecase = DeleteBookUseCase {
        repo: state.book_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /books/{id}/pages ───────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPageRequest {
    pub page_number: i32,
    pub narration_text: Option<String>,
    pub narration_audio_url: Option<String>,
    pub asset_url: Option<String>,
}

pub async fn add_page(
    identity: Identity,
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
    Json(body): Json<AddPageRequest>,
) -> Result<(StatusCode, Json<PageResponse>), ClassroomError> {
    require_role(&identity, ADMINS)?;
    let usecase = AddPageUseCase {
        repo: state.book_repo(),
    };
    let page = usecase
        .execute(
            book_id,
            AddPageInput {
                page_number: body.page_number,
                narration_text: body.narration_text,
                narration_audio_url: body.narration_audio_url,
                asset_url: body.asset_url,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(page.into())))
}

// ── DELETE /books/{id}/pages/{page_id} ───────────────────────────────────────

pub async fn delete_page(
    identity: Identity,
    State(state): State<AppState>,
    Path((book_id, page_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ClassroomError> {
    require_role(&identity, ADMINS)?;
    let usecase = DeletePageUseCase {
        repo: state.book_repo(),
    };
    usecase.execute(book_id, page_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
