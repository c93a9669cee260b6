//! Listing types
use super::book::Book;
use crate::sort::SortSpec;
use serde::{Deserialize, Serialize};

/// Page size used when a request does not name one.
pub const DEFAULT_LIMIT: u32 = 50;

/// One page of books plus the size of the whole collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPage {
    pub books: Vec<Book>,
    /// Rows in the collection, not in this page
    pub total: u64,
}

/// Pagination and ordering for a list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Maximum rows returned, at least 1
    pub limit: u32,
    /// Rows skipped from the start of the ordering
    pub offset: u32,
    pub sort: SortSpec,
}

impl ListQuery {
    pub fn new(limit: u32, offset: u32, sort: SortSpec) -> Self {
        Self {
            limit,
            offset,
            sort,
        }
    }

    /// Zero-based inclusive row range `[offset, offset + limit - 1]`
    pub fn range(&self) -> (u64, u64) {
        let start = u64::from(self.offset);
        let end = start + u64::from(self.limit.max(1)) - 1;
        (start, end)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0, SortSpec::default())
    }
}
