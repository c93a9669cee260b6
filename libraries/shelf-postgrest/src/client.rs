//! HTTP client for a PostgREST endpoint.

use crate::error::{PostgrestError, Result};
use crate::query::TableQuery;
use crate::types::StoreConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Client for a `PostgREST` endpoint.
///
/// Built once from a [`StoreConfig`]; cloning is cheap and shares the
/// connection pool.
///
/// # Example
///
/// ```ignore
/// use shelf_postgrest::{PostgrestClient, StoreConfig};
///
/// let client = PostgrestClient::new(&StoreConfig::new("https://project.supabase.co", "key"))?;
/// let response = client.table("books").select("*").eq("id", "b1").single().execute().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    http: Client,
    rest_url: String,
}

impl PostgrestClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let rest_url = rest_url(&config.url, &config.rest_path)?;

        if config.service_key.is_empty() {
            return Err(PostgrestError::InvalidCredential(
                "service key cannot be empty".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(&config.service_key)
            .map_err(|e| PostgrestError::InvalidCredential(e.to_string()))?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_key))
            .map_err(|e| PostgrestError::InvalidCredential(e.to_string()))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("shelf/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(rest_url = %rest_url, "Created store client");

        Ok(Self { http, rest_url })
    }

    /// Base URL of the REST endpoint, without trailing slash.
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    /// Start a request against `table`.
    pub fn table<'a>(&'a self, table: &str) -> TableQuery<'a> {
        TableQuery::new(self, table)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}

/// Validate the project URL and join the REST path onto it.
fn rest_url(url: &str, rest_path: &str) -> Result<String> {
    if url.is_empty() {
        return Err(PostgrestError::InvalidUrl("URL cannot be empty".into()));
    }

    let base = url.trim_end_matches('/');
    if !base.starts_with("http://") && !base.starts_with("https://") {
        return Err(PostgrestError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    Url::parse(base).map_err(|e| PostgrestError::InvalidUrl(format!("{}: {}", base, e)))?;

    let path = rest_path.trim_matches('/');
    if path.is_empty() {
        Ok(base.to_string())
    } else {
        Ok(format!("{}/{}", base, path))
    }
}
