/// Aria Server - catalog browser backend and storage streaming proxy
use aria_catalog::Catalog;
use aria_server::{
    api,
    config::ServerConfig,
    services::{CredentialBroker, SystemClock},
    state::AppState,
};
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aria-server")]
#[command(about = "Catalog API and streaming proxy for generated tracks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load the track index and print catalog statistics
    Inspect {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aria_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config.as_deref()).await?;
        }
        Commands::Inspect { config } => {
            inspect(config.as_deref())?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load(config_path)?;
    config.validate()?;

    tracing::info!("Starting Aria Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Load the track catalog (once; read-only afterwards)
    let catalog = Catalog::load(&config.storage.index_path)?;
    tracing::info!(
        tracks = catalog.len(),
        generated_at = catalog.generated_at(),
        "catalog loaded"
    );
    let catalog = Arc::new(catalog);

    // Shared upstream HTTP client and credential broker
    let http = reqwest::Client::new();
    let broker = Arc::new(CredentialBroker::new(
        config.storage.clone(),
        http.clone(),
        Arc::new(SystemClock),
    ));
    tracing::info!("credential broker initialized");

    // Build application state and router
    let config = Arc::new(config);
    let app_state = AppState::new(catalog, broker, Arc::clone(&config), http);
    let app = api::router(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive());

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

fn inspect(config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path)?;
    config.validate()?;

    let catalog = Catalog::load(&config.storage.index_path)?;

    println!("Index generated at: {}", catalog.generated_at());
    println!("Tracks: {}", catalog.len());
    println!("Favorites: {}", catalog.favorite_count());
    println!("Models:");
    for model in catalog.models() {
        println!("  {model}");
    }

    Ok(())
}
