use chrono::Utc;
use uuid::Uuid;

use pagewise_domain::pagination::PageRequest;
use pagewise_domain::tenant::TenantScope;

use crate::domain::repository::{BookRepository, ProgressRepository, UserRepository};
use crate::domain::types::{ProgressEvent, ProgressSortBy, ProgressSummary, ProgressView};
use crate::error::ClassroomError;

// ── RecordProgress ───────────────────────────────────────────────────────────

/// Merge one progress event into the caller's record for the book.
pub struct RecordProgressUseCase<P: ProgressRepository, U: UserRepository, B: BookRepository> {
    pub progress: P,
    pub users: U,
    pub books: B,
}

impl<P: ProgressRepository, U: UserRepository, B: BookRepository> RecordProgressUseCase<P, U, B> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        event: ProgressEvent,
    ) -> Result<ProgressView, ClassroomError> {
        if !event.is_valid() {
            return Err(ClassroomError::InvalidProgress);
        }
        scope.require()?;

        let book = self
            .books
            .find_by_id(event.book_id)
            .await?
            .ok_or(ClassroomError::BookNotFound)?;
        self.users
            .find_by_id(scope, user_id)
            .await?
            .ok_or(ClassroomError::UserNotFound)?;

        let progress = self
            .progress
            .reconcile(scope, user_id, &event, Utc::now())
            .await?;
        tracing::debug!(
            %user_id,
            book_id = %progress.book_id,
            current_page = progress.current_page,
            is_completed = progress.is_completed,
            "progress reconciled"
        );
        Ok(ProgressView {
            progress,
            book_title: Some(book.title),
        })
    }
}

// ── GetProgress ──────────────────────────────────────────────────────────────

pub struct GetProgressUseCase<R: ProgressRepository> {
    pub repo: R,
}

impl<R: ProgressRepository> GetProgressUseCase<R> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        book_id: Uuid,
    ) -> Result<ProgressView, ClassroomError> {
        self.repo
            .find(scope, user_id, book_id)
            .await?
            .ok_or(ClassroomError::ProgressNotFound)
    }
}

// ── ListProgress ─────────────────────────────────────────────────────────────

pub struct ListProgressUseCase<R: ProgressRepository> {
    pub repo: R,
}

impl<R: ProgressRepository> ListProgressUseCase<R> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        sort_by: ProgressSortBy,
        page: PageRequest,
    ) -> Result<Vec<ProgressView>, ClassroomError> {
        self.repo.list_for_user(scope, user_id, sort_by, page).await
    }
}

// ── ProgressAnalytics ────────────────────────────────────────────────────────

pub struct ProgressAnalyticsUseCase<R: ProgressRepository> {
    pub repo: R,
}

impl<R: ProgressRepository> ProgressAnalyticsUseCase<R> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        student_id: Option<Uuid>,
    ) -> Result<ProgressSummary, ClassroomError> {
        self.repo.summarize(scope, student_id).await
    }
}
