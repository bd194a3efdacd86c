use chrono::Utc;
use uuid::Uuid;

use pagewise_domain::book::BookStatus;
use pagewise_domain::pagination::PageRequest;

use crate::domain::repository::BookRepository;
use crate::domain::types::{Book, BookPage, BookWithPages};
use crate::error::ClassroomError;

const DEFAULT_LANGUAGE: &str = "tr";

// ── ListBooks ────────────────────────────────────────────────────────────────

pub struct ListBooksUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> ListBooksUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Book>, ClassroomError> {
        self.repo.list(page).await
    }
}

// ── GetBook ──────────────────────────────────────────────────────────────────

pub struct GetBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> GetBookUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<BookWithPages, ClassroomError> {
        let book = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ClassroomError::BookNotFound)?;
        let pages = self.repo.list_pages(id).await?;
        Ok(BookWithPages { book, pages })
    }
}

// ── CreateBook ───────────────────────────────────────────────────────────────

pub struct CreateBookInput {
    pub title: String,
    pub author: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub status: Option<BookStatus>,
}

pub struct CreateBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> CreateBookUseCase<R> {
    pub async fn execute(&self, input: CreateBookInput) -> Result<Book, ClassroomError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(ClassroomError::MissingData);
        }
        let language = input
            .language
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned());
        let book = Book {
            id: Uuid::now_v7(),
            title: title.to_owned(),
            author: input.author,
            language,
            description: input.description,
            status: input.status.unwrap_or_default(),
            page_count: 0,
            created_at: Utc::now(),
        };
        self.repo.create(&book).await?;
        Ok(book)
    }
}

// ── DeleteBook ───────────────────────────────────────────────────────────────

pub struct DeleteBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> DeleteBookUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ClassroomError> {
        if !self.repo.delete(id).await? {
            return Err(ClassroomError::BookNotFound);
        }
        Ok(())
    }
}

// ── AddPage ──────────────────────────────────────────────────────────────────

pub struct AddPageInput {
    pub page_number: i32,
    pub narration_text: Option<String>,
    pub narration_audio_url: Option<String>,
    pub asset_url: Option<String>,
}

pub struct AddPageUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> AddPageUseCase<R> {
    pub async fn execute(
        &self,
        book_id: Uuid,
        input: AddPageInput,
    ) -> Result<BookPage, ClassroomError> {
        if input.page_number < 1 {
            return Err(ClassroomError::InvalidPageNumber);
        }
        self.repo
            .find_by_id(book_id)
            .await?
            .ok_or(ClassroomError::BookNotFound)?;
        let page = BookPage {
            id: Uuid::now_v7(),
            book_id,
            page_number: input.page_number,
            narration_text: input.narration_text,
            narration_audio_url: input.narration_audio_url,
            asset_url: input.asset_url,
            created_at: Utc::now(),
        };
        self.repo.add_page(&page).await?;
        Ok(page)
    }
}

// ── DeletePage ───────────────────────────────────────────────────────────────

pub struct DeletePageUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> DeletePageUseCase<R> {
    pub async fn execute(&self, book_id: Uuid, page_id: Uuid) -> Result<(), ClassroomError> {
        if !self.repo.delete_page(book_id, page_id).await? {
            return Err(ClassroomError::PageNotFound);
        }
        Ok(())
    }
}
