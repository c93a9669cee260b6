//! Shelf PostgREST Adapter
//!
//! Data-access layer that keeps the book collection in a remote `PostgREST`
//! (or Supabase) table.
//!
//! # Features
//!
//! - **Table client**: insert, select, update and delete with `eq` filters,
//!   ordering, row ranges, exact counts and single-object responses
//! - **Unified outcomes**: every store reply is classified once into a value,
//!   a not-found, or a failure
//! - **Book store**: [`PostgrestBookStore`] implements [`shelf_core::BookStore`],
//!   translating the `authors` column on every read and write
//!
//! # Example
//!
//! ```ignore
//! use shelf_core::{BookStore, CreateBook};
//! use shelf_postgrest::{PostgrestBookStore, PostgrestClient, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoreConfig::new("https://project.supabase.co", "service-key");
//!     let store = PostgrestBookStore::new(PostgrestClient::new(&config)?);
//!
//!     let book = store
//!         .create_book(CreateBook::new("Dune", 412, 1965).with_authors(["Frank Herbert"]))
//!         .await?;
//!     println!("Created {} at {}", book.id, book.created_at);
//!
//!     Ok(())
//! }
//! ```

mod books;
mod client;
mod error;
mod outcome;
mod query;
mod response;
mod types;

// Re-export main types
pub use books::{PostgrestBookStore, DEFAULT_TABLE};
pub use client::PostgrestClient;
pub use error::{ApiError, PostgrestError, Result};
pub use outcome::{Failure, Outcome, OutcomeExt};
pub use query::{TableQuery, TableRequest};
pub use response::{ContentRange, PostgrestResponse};
pub use types::{StoreConfig, DEFAULT_REST_PATH};
