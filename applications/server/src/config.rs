/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use shelf_postgrest::StoreConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Project URL variable used by Supabase tooling
pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
/// Service role key variable used by Supabase tooling
pub const SUPABASE_KEY_VAR: &str = "SUPABASE_SERVICE_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_store")]
    pub store: StoreSettings,

    #[serde(default = "default_api")]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub service_key: String,

    #[serde(default = "default_rest_path")]
    pub rest_path: String,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Keeps the service key out of logs
impl std::fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSettings")
            .field("url", &self.url)
            .field("service_key", &"<redacted>")
            .field("rest_path", &self.rest_path)
            .field("table", &self.table)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Limits applied to list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl ServerConfig {
    /// Load configuration from defaults, a config file and the environment.
    ///
    /// Without `path`, `config.toml` in the working directory is used if it
    /// exists. A given `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = Self::file_sources(path);

        // Override with environment variables (e.g. SHELF__SERVER__PORT)
        settings = settings.add_source(
            config::Environment::with_prefix("SHELF")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        settings = settings
            .set_override_option("store.url", std::env::var(SUPABASE_URL_VAR).ok())
            .and_then(|s| {
                s.set_override_option("store.service_key", std::env::var(SUPABASE_KEY_VAR).ok())
            })
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Self::build(settings)
    }

    /// Load configuration from defaults and a single file, ignoring the
    /// environment
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::build(Self::file_sources(Some(path)))
    }

    fn file_sources(
        path: Option<&Path>,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        let settings = config::Config::builder();

        match path {
            Some(path) => settings.add_source(config::File::from(path.to_path_buf())),
            None => {
                // Load from config file if it exists
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings.add_source(config::File::from(config_path))
                } else {
                    settings
                }
            }
        }
    }

    fn build(settings: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.store.url.is_empty() {
            return Err(ServerError::Config(format!(
                "Store URL is required (set {} or SHELF__STORE__URL)",
                SUPABASE_URL_VAR
            )));
        }

        if !self.store.url.starts_with("http://") && !self.store.url.starts_with("https://") {
            return Err(ServerError::Config(format!(
                "Store URL must start with http:// or https:// (got {})",
                self.store.url
            )));
        }

        if self.store.service_key.is_empty() {
            return Err(ServerError::Config(format!(
                "Service key is required (set {} or SHELF__STORE__SERVICE_KEY)",
                SUPABASE_KEY_VAR
            )));
        }

        if self.store.table.is_empty() {
            return Err(ServerError::Config("Store table cannot be empty".to_string()));
        }

        if self.api.default_limit == 0 || self.api.default_limit > self.api.max_limit {
            return Err(ServerError::Config(format!(
                "api.default_limit must be between 1 and api.max_limit ({}), got {}",
                self.api.max_limit, self.api.default_limit
            )));
        }

        Ok(())
    }

    /// Settings for the store client
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.store.url, &self.store.service_key)
            .with_rest_path(&self.store.rest_path)
            .with_timeout(Duration::from_secs(self.store.timeout_secs))
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_store() -> StoreSettings {
    StoreSettings {
        url: String::new(),
        service_key: String::new(),
        rest_path: default_rest_path(),
        table: default_table(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_rest_path() -> String {
    shelf_postgrest::DEFAULT_REST_PATH.to_string()
}

fn default_table() -> String {
    shelf_postgrest::DEFAULT_TABLE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_api() -> ApiSettings {
    ApiSettings {
        default_limit: default_limit(),
        max_limit: default_max_limit(),
    }
}

fn default_limit() -> u32 {
    shelf_core::types::DEFAULT_LIMIT
}

fn default_max_limit() -> u32 {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            store: default_store(),
            api: default_api(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        default_api()
    }
}
