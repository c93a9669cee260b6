//! Table request builder.
//!
//! Covers the operations the adapter needs: insert, select with `eq`
//! filters, update, delete, ordering, row ranges, exact counts and
//! single-object responses.

use crate::client::PostgrestClient;
use crate::error::Result;
use crate::response::PostgrestResponse;
use reqwest::header::{ACCEPT, RANGE};
use reqwest::Method;
use serde_json::Value;
use shelf_core::SortSpec;
use tracing::debug;

/// Media type asking `PostgREST` for one object instead of an array.
pub const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// A table, before the operation is chosen
pub struct TableQuery<'a> {
    client: &'a PostgrestClient,
    table: String,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a PostgrestClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
        }
    }

    /// `GET` the given columns
    pub fn select(self, columns: &str) -> TableRequest<'a> {
        let mut request = TableRequest::new(self, Method::GET, None);
        request.query.push(("select".to_string(), columns.to_string()));
        request
    }

    /// `POST` a row, asking for the stored row back
    pub fn insert(self, row: Value) -> TableRequest<'a> {
        TableRequest::new(self, Method::POST, Some(row)).returning()
    }

    /// `PATCH` matching rows, asking for the updated rows back
    pub fn update(self, changes: Value) -> TableRequest<'a> {
        TableRequest::new(self, Method::PATCH, Some(changes)).returning()
    }

    /// `DELETE` matching rows, asking for the deleted rows back
    pub fn delete(self) -> TableRequest<'a> {
        TableRequest::new(self, Method::DELETE, None).returning()
    }
}

/// A request being built against one table
pub struct TableRequest<'a> {
    client: &'a PostgrestClient,
    table: String,
    method: Method,
    query: Vec<(String, String)>,
    prefer: Vec<&'static str>,
    range: Option<(u64, u64)>,
    single: bool,
    body: Option<Value>,
}

impl<'a> TableRequest<'a> {
    fn new(table: TableQuery<'a>, method: Method, body: Option<Value>) -> Self {
        Self {
            client: table.client,
            table: table.table,
            method,
            query: Vec::new(),
            prefer: Vec::new(),
            range: None,
            single: false,
            body,
        }
    }

    fn returning(mut self) -> Self {
        self.prefer.push("return=representation");
        self
    }

    /// Keep rows where `column` equals `value`
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.query.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    /// Order by a parsed sort token
    pub fn order(mut self, sort: &SortSpec) -> Self {
        self.query.push(("order".to_string(), sort.to_order_param()));
        self
    }

    /// Zero-based inclusive row range
    pub fn range(mut self, from: u64, to: u64) -> Self {
        self.range = Some((from, to));
        self
    }

    /// Ask for the exact number of matching rows in `Content-Range`
    pub fn exact_count(mut self) -> Self {
        self.prefer.push("count=exact");
        self
    }

    /// Expect exactly one row, returned as an object
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Send the request.
    ///
    /// Only transport failures are errors here; the store's own verdict is
    /// read from the returned [`PostgrestResponse`].
    pub async fn execute(self) -> Result<PostgrestResponse> {
        let url = format!("{}/{}", self.client.rest_url(), self.table);

        debug!(
            method = %self.method,
            table = %self.table,
            query = ?self.query,
            range = ?self.range,
            "Sending store request"
        );

        let mut request = self.client.http().request(self.method, &url);
        if !self.query.is_empty() {
            request = request.query(&self.query);
        }
        if !self.prefer.is_empty() {
            request = request.header("Prefer", self.prefer.join(","));
        }
        if let Some((from, to)) = self.range {
            request = request
                .header("Range-Unit", "items")
                .header(RANGE, format!("{}-{}", from, to));
        }
        if self.single {
            request = request.header(ACCEPT, SINGLE_OBJECT);
        }
        if let Some(body) = &self.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        PostgrestResponse::read(response).await
    }
}
