/// Common test utilities and fixtures
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use shelf_core::{
    Book, BookId, BookPage, BookStore, CreateBook, ListQuery, Result, ShelfError, UpdateBook,
};
use std::sync::Mutex;

/// In-memory book store with the same contract as the `PostgREST` adapter
#[derive(Default)]
pub struct InMemoryBookStore {
    books: Mutex<Vec<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.lock().unwrap().len()
    }
}

const SORTABLE: &[&str] = &["id", "title", "pages", "publish_year", "created_at"];

fn compare(column: &str, a: &Book, b: &Book) -> std::cmp::Ordering {
    match column {
        "id" => a.id.cmp(&b.id),
        "title" => a.title.cmp(&b.title),
        "pages" => a.pages.cmp(&b.pages),
        "publish_year" => a.publish_year.cmp(&b.publish_year),
        _ => a.created_at.cmp(&b.created_at),
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn create_book(&self, book: CreateBook) -> Result<Book> {
        let mut books = self.books.lock().unwrap();

        let id = book.id.clone().unwrap_or_else(BookId::generate);
        if books.iter().any(|b| b.id == id) {
            return Err(ShelfError::storage(format!("duplicate key: {}", id)));
        }

        // Distinct, increasing timestamps so newest-first ordering is stable
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let created_at = base + Duration::seconds(books.len() as i64);

        let stored = Book {
            id,
            title: book.title,
            authors: book.authors,
            pages: book.pages,
            publish_year: book.publish_year,
            cover_url: book.cover_url,
            isbn: book.isbn,
            created_at,
        };
        books.push(stored.clone());
        Ok(stored)
    }

    async fn get_book(&self, id: &BookId) -> Result<Option<Book>> {
        let books = self.books.lock().unwrap();
        Ok(books.iter().find(|b| &b.id == id).cloned())
    }

    async fn list_books(&self, query: &ListQuery) -> Result<BookPage> {
        let books = self.books.lock().unwrap();

        let column = query.sort.column.as_str();
        if !SORTABLE.contains(&column) {
            return Err(ShelfError::storage(format!(
                "column books.{} does not exist",
                column
            )));
        }

        let mut sorted = books.clone();
        sorted.sort_by(|a, b| compare(column, a, b));
        if query.sort.is_descending() {
            sorted.reverse();
        }

        let total = sorted.len() as u64;
        let page = sorted
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();

        Ok(BookPage { books: page, total })
    }

    async fn update_book(&self, id: &BookId, changes: UpdateBook) -> Result<Option<Book>> {
        if changes.is_empty() {
            return Err(ShelfError::invalid_input("Nothing to update"));
        }

        let mut books = self.books.lock().unwrap();
        Ok(books.iter_mut().find(|b| &b.id == id).map(|book| {
            changes.apply_to(book);
            book.clone()
        }))
    }

    async fn delete_book(&self, id: &BookId) -> Result<bool> {
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| &b.id != id);
        Ok(books.len() < before)
    }
}

/// Request bodies
pub mod fixtures {
    use serde_json::{json, Value};

    pub fn dune() -> Value {
        json!({
            "title": "Dune",
            "authors": ["Frank Herbert"],
            "pages": 412,
            "publish_year": 1965
        })
    }

    pub fn book(title: &str, pages: i32, publish_year: i32) -> Value {
        json!({
            "title": title,
            "authors": [],
            "pages": pages,
            "publish_year": publish_year
        })
    }
}
