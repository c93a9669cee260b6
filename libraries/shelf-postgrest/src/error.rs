//! Error types for the PostgREST adapter.

use serde_json::Value;
use shelf_core::ShelfError;
use std::fmt;
use thiserror::Error;

/// `PostgREST` code for a singular response that matched no rows.
pub const NO_ROWS_CODE: &str = "PGRST116";

/// PostgreSQL code for a value that cannot be parsed as the column type.
pub const INVALID_TEXT_CODE: &str = "22P02";

/// Errors that can occur when talking to the store.
#[derive(Error, Debug)]
pub enum PostgrestError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Store answered with an error document
    #[error("Store error ({status}): {error}")]
    Api { status: u16, error: ApiError },

    /// Failed to parse a store response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Failed to serialize a request body
    #[error("Failed to serialize request: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid store URL
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    /// Service key cannot be sent as a header
    #[error("Invalid service key: {0}")]
    InvalidCredential(String),

    /// A write that must return rows returned none
    #[error("Store returned no data: {0}")]
    MissingData(String),

    /// The store contradicted a previous successful call
    #[error("Store is inconsistent: {0}")]
    Inconsistent(String),

    /// Update requested with no fields to change
    #[error("Nothing to update")]
    EmptyChanges,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, PostgrestError>;

impl From<PostgrestError> for ShelfError {
    fn from(err: PostgrestError) -> Self {
        match err {
            PostgrestError::EmptyChanges => ShelfError::invalid_input(err.to_string()),
            other => ShelfError::storage(other.to_string()),
        }
    }
}

/// Error document returned by the store.
///
/// `PostgREST` sends `{code, message, details, hint}`. Gateways in front of
/// it send `{message}`, `{msg}` or `{error, error_description}`. All of them
/// land here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl ApiError {
    /// Read an error document from a response body.
    ///
    /// Non-JSON bodies become the message.
    pub fn from_body(body: Option<&Value>) -> Self {
        match body {
            Some(Value::Object(map)) => {
                let field = |key: &str| map.get(key).and_then(text);
                Self {
                    code: field("code").or_else(|| field("error_code")),
                    message: field("message")
                        .or_else(|| field("msg"))
                        .or_else(|| field("error_description"))
                        .or_else(|| field("error")),
                    details: field("details"),
                    hint: field("hint"),
                }
            }
            Some(Value::String(raw)) => Self {
                message: Some(raw.clone()),
                ..Self::default()
            },
            Some(other) => Self {
                message: Some(other.to_string()),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    /// Whether a success body is really an error document.
    ///
    /// Some gateways answer 2xx with `{"error": ...}` in place of rows.
    pub fn embedded_in(body: Option<&Value>) -> Option<Self> {
        let map = body?.as_object()?;
        if map.contains_key("error") && !map.contains_key("id") {
            let mut error = Self::from_body(body);
            if let Some(inner @ Value::Object(_)) = map.get("error") {
                let nested = Self::from_body(Some(inner));
                error = Self {
                    code: nested.code.or(error.code),
                    message: nested.message.or(error.message),
                    details: nested.details.or(error.details),
                    hint: nested.hint.or(error.hint),
                };
            }
            return Some(error);
        }
        None
    }

    /// Whether the error means "no row matched".
    ///
    /// The structured code is checked first. Message text is only consulted
    /// when the store did not send one.
    pub fn is_no_rows(&self) -> bool {
        if let Some(code) = self.code.as_deref() {
            return code == NO_ROWS_CODE && !self.reports_matched_rows();
        }

        self.texts().any(|text| {
            text.contains(NO_ROWS_CODE)
                || text.contains("No rows found")
                || text.to_lowercase().contains("no rows")
        })
    }

    /// Whether the store could not read a filter value as the column type.
    pub fn is_invalid_text(&self) -> bool {
        self.code.as_deref() == Some(INVALID_TEXT_CODE)
    }

    /// `PGRST116` is also raised when a single-row request matched several
    /// rows; `details` then reads "The result contains N rows".
    fn reports_matched_rows(&self) -> bool {
        let Some(details) = self.details.as_deref() else {
            return false;
        };
        let mut words = details.split_whitespace();
        while let Some(word) = words.next() {
            if word == "contains" {
                return words
                    .next()
                    .and_then(|n| n.parse::<u64>().ok())
                    .is_some_and(|n| n > 0);
            }
        }
        false
    }

    fn texts(&self) -> impl Iterator<Item = &str> {
        [&self.code, &self.message, &self.details, &self.hint]
            .into_iter()
            .filter_map(|t| t.as_deref())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message.as_deref().unwrap_or("unknown error");
        match &self.code {
            Some(code) => write!(f, "{} [{}]", message, code)?,
            None => write!(f, "{}", message)?,
        }
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
