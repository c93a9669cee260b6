/// API route modules
pub mod books;
pub mod health;
