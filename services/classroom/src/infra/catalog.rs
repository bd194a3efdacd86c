use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::Expr,
};
use uuid::Uuid;

use pagewise_classroom_schema::{book_pages, books};
use pagewise_domain::book::BookStatus;
use pagewise_domain::pagination::PageRequest;

use crate::domain::repository::BookRepository;
use crate::domain::types::{Book, BookPage};
use crate::error::ClassroomError;
use crate::infra::is_unique_violation_in_txn;

#[derive(Clone)]
pub struct DbBookRepository {
    pub db: DatabaseConnection,
}

impl BookRepository for DbBookRepository {
    async fn list(&self, page: PageRequest) -> Result<Vec<Book>, ClassroomError> {
        let models = books::Entity::find()
            .order_by_desc(books::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list books")?;
        Ok(models.into_iter().map(book_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, ClassroomError> {
        let model = books::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find book by id")?;
        Ok(model.map(book_from_model))
    }

    async fn list_pages(&self, book_id: Uuid) -> Result<Vec<BookPage>, ClassroomError> {
        let models = book_pages::Entity::find()
            .filter(book_pages::Column::BookId.eq(book_id))
            .order_by_asc(book_pages::Column::PageNumber)
            .all(&self.db)
            .await
            .context("list book pages")?;
        Ok(models.into_iter().map(page_from_model).collect())
    }

    async fn create(&self, book: &Book) -> Result<(), ClassroomError> {
        books::ActiveModel {
            id: Set(book.id),
            title: Set(book.title.clone()),
            author: Set(book.author.clone()),
            language: Set(book.language.clone()),
            description: Set(book.description.clone()),
            status: Set(book.status.as_str().to_owned()),
            page_count: Set(0),
            created_at: Set(book.created_at),
        }
        .insert(&self.db)
        .await
        .context("create book")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ClassroomError> {
        let result = books::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete book")?;
        Ok(result.rows_affected > 0)
    }

    async fn add_page(&self, page: &BookPage) -> Result<(), ClassroomError> {
        let book_id = page.book_id;
        let model = book_pages::ActiveModel {
            id: Set(page.id),
            book_id: Set(page.book_id),
            page_number: Set(page.page_number),
            narration_text: Set(page.narration_text.clone()),
            narration_audio_url: Set(page.narration_audio_url.clone()),
            asset_url: Set(page.asset_url.clone()),
            created_at: Set(page.created_at),
        };
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    model.insert(txn).await?;
                    refresh_page_count(txn, book_id).await
                })
            })
            .await
            .map_err(|e| {
                if is_unique_violation_in_txn(&e) {
                    ClassroomError::PageNumberTaken
                } else {
                    anyhow::Error::new(e).context("add book page").into()
                }
            })
    }

    async fn delete_page(&self, book_id: Uuid, page_id: Uuid) -> Result<bool, ClassroomError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let result = book_pages::Entity::delete_many()
                        .filter(book_pages::Column::Id.eq(page_id))
                        .filter(book_pages::Column::BookId.eq(book_id))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    refresh_page_count(txn, book_id).await?;
                    Ok(true)
                })
            })
            .await
            .context("delete book page")?;
        Ok(deleted)
    }
}

/// Rewrite `books.page_count` from the stored pages.
async fn refresh_page_count<C: ConnectionTrait>(conn: &C, book_id: Uuid) -> Result<(), DbErr> {
    let count = book_pages::Entity::find()
        .filter(book_pages::Column::BookId.eq(book_id))
        .count(conn)
        .await?;
    books::Entity::update_many()
        .col_expr(
            books::Column::PageCount,
            Expr::value(i32::try_from(count).unwrap_or(i32::MAX)),
        )
        .filter(books::Column::Id.eq(book_id))
        .exec(conn)
        .await?;
    Ok(())
}

fn book_from_model(model: books::Model) -> Book {
    Book {
        id: model.id,
        title: model.title,
        author: model.author,
        language: model.language,
        description: model.description,
        status: BookStatus::from_stored(&model.status),
        page_count: model.page_count,
        created_at: model.created_at,
    }
}

fn page_from_model(model: book_pages::Model) -> BookPage {
    BookPage {
        id: model.id,
        book_id: model.book_id,
        page_number: model.page_number,
        narration_text: model.narration_text,
        narration_audio_url: model.narration_audio_url,
        asset_url: model.asset_url,
        created_at: model.created_at,
    }
}
