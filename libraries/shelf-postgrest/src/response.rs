//! Store responses and their classification.

use crate::error::{ApiError, PostgrestError, Result};
use crate::outcome::{Failure, Outcome};
use reqwest::header::CONTENT_RANGE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parsed `Content-Range` header, e.g. `0-24/3573` or `*/0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    /// Rows in the whole result, when the store counted them
    pub total: Option<u64>,
}

impl ContentRange {
    pub fn parse(header: &str) -> Option<Self> {
        let (range, total) = header.trim().split_once('/')?;

        let total = match total {
            "*" => None,
            n => Some(n.parse().ok()?),
        };

        if range != "*" {
            let (from, to) = range.split_once('-')?;
            from.parse::<u64>().ok()?;
            to.parse::<u64>().ok()?;
        }

        Some(Self { total })
    }
}

/// A store reply, read but not yet classified
#[derive(Debug, Clone)]
pub struct PostgrestResponse {
    pub status: StatusCode,
    /// JSON body; `None` when the store sent nothing
    pub body: Option<Value>,
    pub content_range: Option<ContentRange>,
}

impl PostgrestResponse {
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let content_range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(ContentRange::parse);

        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            None
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => Some(value),
                // Error pages from proxies are often plain text or HTML
                Err(_) if !status.is_success() => Some(Value::String(text)),
                Err(e) => {
                    return Err(PostgrestError::ParseError(format!(
                        "invalid JSON from store: {}",
                        e
                    )))
                }
            }
        };

        Ok(Self {
            status,
            body,
            content_range,
        })
    }

    /// Total row count from `Content-Range`, if the store sent one
    pub fn total(&self) -> Option<u64> {
        self.content_range.and_then(|range| range.total)
    }

    /// Sort the reply into a usable response, a not-found, or a failure.
    ///
    /// An error status and an error document inside a success body are
    /// treated alike.
    pub fn into_outcome(self) -> Outcome<Self> {
        let error = if self.status.is_success() {
            ApiError::embedded_in(self.body.as_ref())
        } else {
            Some(ApiError::from_body(self.body.as_ref()))
        };

        match error {
            None => Ok(self),
            Some(error) if error.is_no_rows() => Err(Failure::NotFound),
            Some(error) => Err(Failure::Failed(PostgrestError::Api {
                status: self.status.as_u16(),
                error,
            })),
        }
    }

    /// Decode the body as rows.
    ///
    /// `None` when there is no body. A single object counts as one row.
    pub fn into_rows<T: DeserializeOwned>(self) -> Result<Option<Vec<T>>> {
        let Some(body) = self.body else {
            return Ok(None);
        };

        let rows = match body {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<std::result::Result<Vec<T>, _>>(),
            object @ Value::Object(_) => serde_json::from_value(object).map(|row| vec![row]),
            other => {
                return Err(PostgrestError::ParseError(format!(
                    "expected rows, got {}",
                    other
                )))
            }
        };

        rows.map(Some)
            .map_err(|e| PostgrestError::ParseError(format!("invalid row: {}", e)))
    }
}
