//! Shelf Core
//!
//! Store-agnostic types, codecs, and validation rules for the Shelf book API.
//!
//! This crate has no I/O. It is shared by the `PostgREST` adapter and the
//! HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Book`, `CreateBook`, `UpdateBook`, `BookPage`, `ListQuery`
//! - **Codecs**: the `authors` list/string codec and the sort token parser
//! - **Validation**: the `Validate` rules applied at the API boundary
//! - **Store Trait**: `BookStore`, implemented by remote adapters
//! - **Error Handling**: unified `ShelfError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use shelf_core::{authors, SortDirection, SortSpec};
//!
//! let sort = SortSpec::parse("-created_at");
//! assert_eq!(sort.column, "created_at");
//! assert_eq!(sort.direction, SortDirection::Descending);
//!
//! let stored = authors::encode(&["Ursula K. Le Guin".to_string(), "Jo Walton".to_string()]);
//! assert_eq!(stored, "Ursula K. Le Guin, Jo Walton");
//! assert_eq!(authors::decode(stored.into()), vec!["Ursula K. Le Guin", "Jo Walton"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod authors;
pub mod error;
pub mod sort;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use authors::AuthorsField;
pub use error::{Result, ShelfError};
pub use sort::{SortDirection, SortSpec};
pub use storage::BookStore;
pub use types::{Book, BookId, BookPage, CreateBook, ListQuery, UpdateBook};
pub use validation::{Validate, ValidationError};
