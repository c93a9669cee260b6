//! Storage trait for books

use crate::error::Result;
use crate::types::{Book, BookId, BookPage, CreateBook, ListQuery, UpdateBook};
use async_trait::async_trait;

/// Store holding the book collection
///
/// A missing record is an `Ok` outcome (`None` / `false`), never an error.
/// Errors are reserved for data-access failures and rejected input.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a book and return the stored row, including store-assigned fields
    async fn create_book(&self, book: CreateBook) -> Result<Book>;

    /// Get book by ID
    async fn get_book(&self, id: &BookId) -> Result<Option<Book>>;

    /// One page of books plus the collection size
    async fn list_books(&self, query: &ListQuery) -> Result<BookPage>;

    /// Apply the populated fields of `changes` and return the updated row
    ///
    /// An empty change set is rejected without touching the store.
    async fn update_book(&self, id: &BookId, changes: UpdateBook) -> Result<Option<Book>>;

    /// Delete a book; `false` when no such book existed
    async fn delete_book(&self, id: &BookId) -> Result<bool>;
}
