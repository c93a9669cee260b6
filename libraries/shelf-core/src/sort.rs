//! Sort token parsing.
//!
//! A token names one column, optionally prefixed with `-` for descending
//! order: `"-created_at"`, `"title"`. Column names are not checked here; the
//! store rejects unknown columns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token used when a list request does not name one.
pub const DEFAULT_SORT: &str = "-created_at";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// `PostgREST` spelling of the direction
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// A parsed sort token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    /// Column to order by
    pub column: String,
    /// Order direction
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parse a sort token.
    ///
    /// A single leading `-` selects descending order and is stripped.
    pub fn parse(token: &str) -> Self {
        match token.strip_prefix('-') {
            Some(column) => Self::descending(column),
            None => Self::ascending(token),
        }
    }

    /// Ascending order on `column`
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending order on `column`
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Whether the order is descending
    pub fn is_descending(&self) -> bool {
        self.direction == SortDirection::Descending
    }

    /// Value for a `PostgREST` `order` query parameter.
    ///
    /// Rows with a null sort key always come last.
    pub fn to_order_param(&self) -> String {
        format!("{}.{}.nullslast", self.column, self.direction.as_str())
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::parse(DEFAULT_SORT)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.column),
            SortDirection::Descending => write!(f, "-{}", self.column),
        }
    }
}

impl From<&str> for SortSpec {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}
