//! Fuel locator server binary.

use anyhow::Context;
use clap::Parser;
use fuel_locator::api::rest::{AppState, create_router};
use fuel_locator::application::services::ProximityRankingService;
use fuel_locator::config::{AppConfig, LoggingConfig};
use fuel_locator::infrastructure::persistence::StationRepository;
use fuel_locator::infrastructure::persistence::in_memory::InMemoryStationRepository;
use fuel_locator::infrastructure::persistence::postgres::PostgresStationRepository;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Serves nearby fuel stations ranked by distance and price.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON); environment variables override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env is normal outside development.
    let _ = dotenvy::dotenv();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.logging)?;

    let directory = connect_directory(&config).await?;
    let ranking = ProximityRankingService::new(directory, config.ranking_config()?);

    info!(
        default_radius = %ranking.config().default_radius(),
        max_radius = %ranking.config().max_radius(),
        "ranking service ready"
    );

    let router = create_router(Arc::new(AppState::new(ranking)));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!(%address, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("initialising tracing: {e}"))
}

async fn connect_directory(config: &AppConfig) -> anyhow::Result<Arc<dyn StationRepository>> {
    match &config.database.url {
        Some(url) => {
            let repository =
                PostgresStationRepository::connect(url, config.database.max_connections)
                    .await
                    .context("connecting to PostgreSQL")?;
            repository.migrate().await.context("applying schema")?;
            info!(
                max_connections = config.database.max_connections,
                "using PostgreSQL station directory"
            );
            Ok(Arc::new(repository))
        }
        None => {
            warn!("no database.url configured, stations are kept in memory only");
            Ok(Arc::new(InMemoryStationRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received SIGTERM, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
