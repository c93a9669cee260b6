//! Shelf Server Library
//!
//! HTTP API over a book collection kept in a `PostgREST` store.
//!
//! This library exposes the router and its parts for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{ApiSettings, ServerConfig};
pub use error::{Result, ServerError};
pub use extract::ValidatedJson;
pub use router::create_router;
pub use state::AppState;
