//! Book store backed by a PostgREST table.

use crate::client::PostgrestClient;
use crate::error::{PostgrestError, Result};
use crate::outcome::{Failure, Outcome, OutcomeExt};
use crate::response::PostgrestResponse;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shelf_core::{authors, Book, BookId, BookPage, BookStore, CreateBook, ListQuery, UpdateBook};
use tracing::{debug, info, warn};

/// Table holding the books unless configured otherwise.
pub const DEFAULT_TABLE: &str = "books";

/// A row as the store returns it.
///
/// `authors` may come back as a joined string, a list, or null.
#[derive(Debug, Deserialize)]
struct BookRow {
    id: BookId,
    title: String,
    #[serde(default, deserialize_with = "authors::deserialize")]
    authors: Vec<String>,
    pages: i32,
    publish_year: i32,
    #[serde(default)]
    cover_url: Option<String>,
    #[serde(default)]
    isbn: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            authors: row.authors,
            pages: row.pages,
            publish_year: row.publish_year,
            cover_url: row.cover_url,
            isbn: row.isbn,
            created_at: row.created_at,
        }
    }
}

/// Columns sent on insert or update; unset fields are left out.
///
/// `authors` is always written as the joined string.
#[derive(Debug, Default, Serialize)]
struct BookWrite<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a BookId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publish_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cover_url: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    isbn: Option<Option<&'a str>>,
}

impl<'a> BookWrite<'a> {
    fn insert(id: &'a BookId, book: &'a CreateBook) -> Self {
        Self {
            id: Some(id),
            title: Some(&book.title),
            authors: Some(authors::encode(&book.authors)),
            pages: Some(book.pages),
            publish_year: Some(book.publish_year),
            // Omitted rather than null so tables without these columns accept the insert
            cover_url: book.cover_url.as_deref().map(Some),
            isbn: book.isbn.as_deref().map(Some),
        }
    }

    fn changes(changes: &'a UpdateBook) -> Self {
        Self {
            id: None,
            title: changes.title.as_deref(),
            authors: changes.authors.as_deref().map(authors::encode),
            pages: changes.pages,
            publish_year: changes.publish_year,
            cover_url: changes.cover_url.as_ref().map(|v| v.as_deref()),
            isbn: changes.isbn.as_ref().map(|v| v.as_deref()),
        }
    }

    fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// An id the column cannot hold matches no row.
fn absent_on_invalid_id(failure: Failure) -> Failure {
    match failure {
        Failure::Failed(PostgrestError::Api { ref error, .. }) if error.is_invalid_text() => {
            Failure::NotFound
        }
        other => other,
    }
}

/// Book store that keeps the collection in a `PostgREST` table.
#[derive(Debug, Clone)]
pub struct PostgrestBookStore {
    client: PostgrestClient,
    table: String,
}

impl PostgrestBookStore {
    /// Store using the default `books` table.
    pub fn new(client: PostgrestClient) -> Self {
        Self::with_table(client, DEFAULT_TABLE)
    }

    pub fn with_table(client: PostgrestClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Read one book by id.
    async fn fetch(&self, id: &BookId) -> Outcome<Book> {
        let response = self
            .client
            .table(&self.table)
            .select("*")
            .eq("id", id.as_str())
            .single()
            .execute()
            .await?
            .into_outcome()
            .map_err(absent_on_invalid_id)?;

        let row = response
            .into_rows::<BookRow>()?
            .and_then(|rows| rows.into_iter().next());

        match row {
            Some(row) => Ok(row.into()),
            None => Err(Failure::NotFound),
        }
    }

    async fn insert(&self, book: CreateBook) -> Result<Book> {
        let id = book.id.clone().unwrap_or_else(BookId::generate);
        let payload = BookWrite::insert(&id, &book).to_value()?;

        debug!(table = %self.table, id = %id, "Inserting book");

        let inserted = self
            .client
            .table(&self.table)
            .insert(payload)
            .execute()
            .await?
            .into_outcome()
            .required("insert matched no rows")?
            .into_rows::<Value>()?
            .unwrap_or_default();

        if inserted.is_empty() {
            return Err(PostgrestError::MissingData(format!(
                "insert of book {} returned no rows",
                id
            )));
        }

        match self.fetch(&id).await {
            Ok(book) => {
                info!(id = %book.id, title = %book.title, "Created book");
                Ok(book)
            }
            Err(Failure::NotFound) => Err(PostgrestError::Inconsistent(format!(
                "book {} was inserted but cannot be read back",
                id
            ))),
            Err(Failure::Failed(err)) => Err(err),
        }
    }

    async fn page(&self, query: &ListQuery) -> Result<BookPage> {
        let (from, to) = query.range();

        debug!(
            table = %self.table,
            sort = %query.sort,
            from,
            to,
            "Listing books"
        );

        let response = self
            .client
            .table(&self.table)
            .select("*")
            .order(&query.sort)
            .range(from, to)
            .exact_count()
            .execute()
            .await?;

        // Offset past the last row
        if response.status == StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok(BookPage {
                books: Vec::new(),
                total: response.total().unwrap_or(0),
            });
        }

        let counted = response.total();
        let rows = response
            .into_outcome()
            .required("list matched no rows")?
            .into_rows::<BookRow>()?
            .unwrap_or_default();

        let mut books: Vec<Book> = rows.into_iter().map(Book::from).collect();
        books.truncate(query.limit as usize);

        let total = counted.unwrap_or_else(|| {
            warn!(table = %self.table, "Store did not report a row count");
            from + books.len() as u64
        });

        Ok(BookPage { books, total })
    }

    async fn patch(&self, id: &BookId, changes: UpdateBook) -> Result<Option<Book>> {
        if changes.is_empty() {
            return Err(PostgrestError::EmptyChanges);
        }

        let payload = BookWrite::changes(&changes).to_value()?;

        debug!(table = %self.table, id = %id, "Updating book");

        let outcome = self
            .client
            .table(&self.table)
            .update(payload)
            .eq("id", id.as_str())
            .single()
            .execute()
            .await?
            .into_outcome()
            .map_err(absent_on_invalid_id);

        let response = match outcome {
            Ok(response) => response,
            Err(Failure::NotFound) => return Ok(None),
            Err(Failure::Failed(err)) => return Err(err),
        };

        match response.into_rows::<BookRow>()? {
            Some(rows) => Ok(rows.into_iter().next().map(Book::from)),
            // Success without a representation: read the row back
            None => self.fetch(id).await.found(),
        }
    }

    async fn remove(&self, id: &BookId) -> Result<bool> {
        debug!(table = %self.table, id = %id, "Deleting book");

        let outcome = self
            .client
            .table(&self.table)
            .delete()
            .eq("id", id.as_str())
            .execute()
            .await?
            .into_outcome()
            .map_err(absent_on_invalid_id);

        let response: PostgrestResponse = match outcome {
            Ok(response) => response,
            Err(Failure::NotFound) => return Ok(false),
            Err(Failure::Failed(err)) => return Err(err),
        };

        match response.into_rows::<Value>()? {
            Some(rows) => {
                let deleted = !rows.is_empty();
                if deleted {
                    info!(id = %id, "Deleted book");
                }
                Ok(deleted)
            }
            // The store did not say what it removed; check the row is gone
            None => match self.fetch(id).await {
                Err(Failure::NotFound) => {
                    info!(id = %id, "Deleted book");
                    Ok(true)
                }
                Ok(_) => Err(PostgrestError::Inconsistent(format!(
                    "delete of book {} succeeded but the row is still present",
                    id
                ))),
                Err(Failure::Failed(err)) => Err(err),
            },
        }
    }
}

#[async_trait]
impl BookStore for PostgrestBookStore {
    async fn create_book(&self, book: CreateBook) -> shelf_core::Result<Book> {
        Ok(self.insert(book).await?)
    }

    async fn get_book(&self, id: &BookId) -> shelf_core::Result<Option<Book>> {
        Ok(self.fetch(id).await.found()?)
    }

    async fn list_books(&self, query: &ListQuery) -> shelf_core::Result<BookPage> {
        Ok(self.page(query).await?)
    }

    async fn update_book(
        &self,
        id: &BookId,
        changes: UpdateBook,
    ) -> shelf_core::Result<Option<Book>> {
        Ok(self.patch(id, changes).await?)
    }

    async fn delete_book(&self, id: &BookId) -> shelf_core::Result<bool> {
        Ok(self.remove(id).await?)
    }
}
