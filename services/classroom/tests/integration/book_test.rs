use uuid::Uuid;

use pagewise_classroom::error::ClassroomError;
use pagewise_classroom::usecase::book::{
    AddPageInput, AddPageUseCase, DeleteBookUseCase, DeletePageUseCase, GetBookUseCase,
};

use crate::helpers::{MemoryStore, seed_book};

fn page(page_number: i32) -> AddPageInput {
    AddPageInput {
        page_number,
        narration_text: Some(format!("Page {page_number}")),
        narration_audio_url: None,
        asset_url: None,
    }
}

#[tokio::test]
async fn should_track_page_count_as_pages_change() {
    let store = MemoryStore::default();
    let book = seed_book(&store, "The Little Fox", 3).await;
    let get = GetBookUseCase {
        repo: store.clone(),
    };

    let detail = get.execute(book).await.unwrap();
    assert_eq!(detail.book.page_count, 3);
    assert_eq!(detail.pages.len(), 3);

    let second = detail.pages[1].id;
    DeletePageUseCase {
        repo: store.clone(),
    }
    .execute(book, second)
    .await
    .unwrap();

    let detail = get.execute(book).await.unwrap();
    assert_eq!(detail.book.page_count, 2);
    let numbers: Vec<i32> = detail.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 3]);
}

#[tokio::test]
async fn should_return_pages_in_page_number_order() {
    let store = MemoryStore::default();
    let book = seed_book(&store, "Night Owl", 0).await;
    let add = AddPageUseCase {
        repo: store.clone(),
    };
    for number in [3, 1, 2] {
        add.execute(book, page(number)).await.unwrap();
    }

    let detail = GetBookUseCase {
        repo: store.clone(),
    }
    .execute(book)
    .await
    .unwrap();
    let numbers: Vec<i32> = detail.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(detail.book.page_count, 3);
}

#[tokio::test]
async fn should_reject_duplicate_page_number() {
    let store = MemoryStore::default();
    let book = seed_book(&store, "The Little Fox", 2).await;

    let result = AddPageUseCase {
        repo: store.clone(),
    }
    .execute(book, page(2))
    .await;

    assert!(
        matches!(result, Err(ClassroomError::PageNumberTaken)),
        "expected PageNumberTaken, got {result:?}"
    );
    assert_eq!(store.tables().pages.len(), 2);
}

#[tokio::test]
async fn should_reject_page_for_unknown_book() {
    let store = MemoryStore::default();

    let result = AddPageUseCase {
        repo: store.clone(),
    }
    .execute(Uuid::now_v7(), page(1))
    .await;

    assert!(
        matches!(result, Err(ClassroomError::BookNotFound)),
        "expected BookNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_missing_page_on_delete() {
    let store = MemoryStore::default();
    let book = seed_book(&store, "The Little Fox", 1).await;

    let result = DeletePageUseCase {
        repo: store.clone(),
    }
    .execute(book, Uuid::now_v7())
    .await;

    assert!(
        matches!(result, Err(ClassroomError::PageNotFound)),
        "expected PageNotFound, got {result:?}"
    );
    assert_eq!(store.tables().books[0].page_count, 1);
}

#[tokio::test]
async fn should_delete_book_with_its_pages() {
    let store = MemoryStore::default();
    let book = seed_book(&store, "The Little Fox", 2).await;
    let delete = DeleteBookUseCase {
        repo: store.clone(),
    };

    delete.execute(book).await.unwrap();
    assert!(store.tables().pages.is_empty());

    let again = delete.execute(book).await;
    assert!(
        matches!(again, Err(ClassroomError::BookNotFound)),
        "expected BookNotFound, got {again:?}"
    );
}
