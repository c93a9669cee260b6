mod book;
mod ids;
mod list;

pub use book::{Book, CreateBook, UpdateBook};
pub use ids::BookId;
pub use list::{BookPage, ListQuery, DEFAULT_LIMIT};
