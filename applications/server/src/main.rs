/// Shelf Server - book collection HTTP API
use clap::{Parser, Subcommand};
use shelf_postgrest::{PostgrestBookStore, PostgrestClient};
use shelf_server::{config::ServerConfig, create_router, state::AppState};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelf-server")]
#[command(about = "Book collection API backed by a PostgREST store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "SHELF_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Load and validate configuration, then print it
    CheckConfig {
        /// Configuration file path
        #[arg(short, long, env = "SHELF_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shelf_server=info,shelf_postgrest=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config.as_deref()).await?;
        }
        Commands::CheckConfig { config } => {
            check_config(config.as_deref())?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

async fn serve(config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    tracing::info!("Starting Shelf Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Store: {} (table {})", config.store.url, config.store.table);

    let client = PostgrestClient::new(&config.store_config())?;
    let store = PostgrestBookStore::with_table(client, &config.store.table);

    // Build application state
    let app_state = AppState::new(Arc::new(store), config.api);

    // Build router
    let app = create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn check_config(config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    println!("Configuration OK");
    println!("  server.host        = {}", config.server.host);
    println!("  server.port        = {}", config.server.port);
    println!("  store.url          = {}", config.store.url);
    println!("  store.rest_path    = {}", config.store.rest_path);
    println!("  store.table        = {}", config.store.table);
    println!("  store.timeout_secs = {}", config.store.timeout_secs);
    println!("  api.default_limit  = {}", config.api.default_limit);
    println!("  api.max_limit      = {}", config.api.max_limit);

    Ok(())
}
