//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter. All concrete implementations are instantiated here.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use songlib_core::ports::SongDetailPort;
use songlib_core::services::AppCore;
use songlib_db::CoreFactory;
use songlib_detail::{DefaultDetailClient, DetailClientConfig};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::routes::create_router;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration, read from flags with environment fallbacks.
#[derive(Debug, Clone, Parser)]
#[command(name = "songlib-server", version, about = "Song catalog HTTP server")]
pub struct ServerConfig {
    /// Port for the HTTP server.
    #[arg(long, env = "SONGLIB_PORT", default_value_t = 8080)]
    pub port: u16,

    /// `SQLite` database URL (`sqlite::memory:` for a throwaway database).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://songlib.db")]
    pub database_url: String,

    /// Base URL of the song detail service.
    #[arg(long, env = "SONG_DETAIL_API_URL")]
    pub detail_api_url: String,

    /// Timeout for one song detail request, in seconds.
    #[arg(long, env = "SONG_DETAIL_TIMEOUT_SECS", default_value_t = 10)]
    pub detail_timeout_secs: u64,

    /// How long in-flight requests may run after a shutdown signal, in seconds.
    #[arg(long, env = "SONGLIB_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, env = "SONGLIB_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Allowed CORS origin; repeat for several. All origins are allowed when absent.
    #[arg(long = "cors-origin", value_name = "ORIGIN")]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// CORS policy derived from the configured origins.
    pub fn cors(&self) -> CorsConfig {
        if self.cors_origins.is_empty() {
            CorsConfig::AllowAll
        } else {
            CorsConfig::AllowOrigins(self.cors_origins.clone())
        }
    }

    fn detail_client_config(&self) -> DetailClientConfig {
        DetailClientConfig::new(&self.detail_api_url)
            .with_timeout(Duration::from_secs(self.detail_timeout_secs))
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<AppCore>,
}

/// Build every service the server needs.
///
/// Opens (and if necessary creates) the database, applies the schema and
/// builds the song detail client.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    info!(
        database_url = %config.database_url,
        detail_api_url = %config.detail_api_url,
        detail_timeout_secs = config.detail_timeout_secs,
        "Axum bootstrap"
    );

    // 1. Create database pool with full schema setup
    let pool = CoreFactory::create_pool(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    // 2. Song detail client
    let detail: Arc<dyn SongDetailPort> = Arc::new(
        DefaultDetailClient::new(&config.detail_client_config())
            .context("failed to build song detail client")?,
    );

    // 3. Assemble AppCore
    let core = Arc::new(CoreFactory::build_app_core(pool, detail));

    Ok(AxumContext { core })
}

/// Bootstrap and run the server until a shutdown signal arrives.
///
/// After Ctrl-C or SIGTERM the server stops accepting connections and
/// waits up to `shutdown_timeout_secs` for in-flight requests.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = bootstrap(&config).await?;
    let app = create_router(ctx, &config.cors());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("songlib server listening on http://{}", addr);

    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    let grace = Duration::from_secs(config.shutdown_timeout_secs);
    let deadline = async move {
        if signalled_rx.await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result.context("server error")?,
        () = deadline => warn!(?grace, "Graceful shutdown timed out; dropping open connections"),
    }

    info!("songlib server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
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
    info!("Shutdown signal received");
}
