//! ambient-dash - personal analytics dashboard
//!
//! Serves the dashboard page and JSON API:
//! - GET /api/spotify: mood of the caller's recently played tracks
//! - GET /api/dashboard: summary cards and wellness trend
//! - GET /health, GET /api/buildinfo

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ambient_common::config::{resolve_config_path, TomlConfig};
use ambient_dash::services::SpotifyClient;
use ambient_dash::{build_router, db, AppState};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

/// Command-line arguments for ambient-dash
///
/// Each flag overrides the matching TOML setting.
#[derive(Parser, Debug)]
#[command(name = "ambient-dash")]
#[command(about = "Personal analytics dashboard with music mood")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long, env = "AMBIENT_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "AMBIENT_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "AMBIENT_PORT")]
    port: Option<u16>,

    /// SQLite database holding behavioral_data
    #[arg(short, long, env = "AMBIENT_DATABASE")]
    database: Option<PathBuf>,

    /// Music provider API base URL
    #[arg(long, env = "AMBIENT_SPOTIFY_BASE_URL")]
    spotify_base_url: Option<String>,
}

impl Args {
    fn apply(self, mut config: TomlConfig) -> TomlConfig {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(database) = self.database {
            config.database_path = Some(database);
        }
        if let Some(base_url) = self.spotify_base_url {
            config.spotify.base_url = base_url;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing init because it carries the log level
    let config_path = resolve_config_path(args.config.as_deref());
    let file_config = match &config_path {
        Some(path) => TomlConfig::load(path).context("Failed to load configuration")?,
        None => TomlConfig::default(),
    };
    let config = args.apply(file_config);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    // Build identification first, before any slow startup work
    info!(
        "Starting Ambient Dashboard (ambient-dash) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config_path {
        Some(path) if path.exists() => info!("Configuration: {}", path.display()),
        Some(path) => warn!("No config file at {}, using defaults", path.display()),
        None => warn!("No config directory on this platform, using defaults"),
    }

    let music_api = SpotifyClient::new(
        config.spotify.base_url.clone(),
        Duration::from_secs(config.spotify.timeout_secs),
    )
    .context("Failed to build Spotify client")?;
    info!(
        "Spotify API: {} (timeout {}s)",
        music_api.base_url(),
        config.spotify.timeout_secs
    );

    let pool = match &config.database_path {
        Some(path) => match db::connect_readonly(path).await {
            Ok(pool) => {
                info!("✓ Connected to database (read-only): {}", path.display());
                Some(pool)
            }
            Err(e) => {
                error!("Failed to connect to database: {}", e);
                return Err(e);
            }
        },
        None => {
            info!("No database configured; wellness trend will be empty");
            None
        }
    };

    let state = AppState::new(Arc::new(music_api), pool);
    let app = build_router(state);

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("ambient-dash listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ambient-dash stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
