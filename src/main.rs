//! Balance Proxy - a read-through caching proxy for account balances
//!
//! Serves cached balances for up to two minutes and forwards misses to the
//! upstream lookup service.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use balance_proxy::api::create_router;
use balance_proxy::cache::{CacheBackend, MemoryBackend, ReadThroughCache, RedisBackend};
use balance_proxy::config::{Config, LogFormat};
use balance_proxy::upstream::HttpUpstream;
use balance_proxy::{spawn_cleanup_task, AppState, BalanceService};

/// Main entry point for the balance proxy.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Connect the cache store (Redis or in-process)
/// 4. Build the upstream client and balance service
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(config.log_format);

    info!("Starting Balance Proxy");
    info!(
        "Configuration loaded: port={}, upstream={}, store={}",
        config.server_port,
        config.upstream_endpoint,
        if config.redis_url.is_some() { "redis" } else { "memory" }
    );

    let (backend, cleanup_handle) = build_backend(&config).await?;

    let upstream = HttpUpstream::new(
        config.upstream_endpoint.clone(),
        config.upstream_token.clone(),
        config.upstream_timeout(),
    )
    .context("building upstream client")?;
    if config.upstream_token.is_none() {
        warn!("UPSTREAM_TOKEN is not set, upstream requests are unauthenticated");
    }

    let service = BalanceService::new(ReadThroughCache::new(backend), Arc::new(upstream));
    let app = create_router(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Installs the global subscriber.
///
/// Defaults to "info" for this crate and tower_http, overridable with RUST_LOG.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "balance_proxy=info,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Connects the configured store. The in-process store also gets its
/// background sweep, whose handle is returned for shutdown.
async fn build_backend(
    config: &Config,
) -> anyhow::Result<(Arc<dyn CacheBackend>, Option<JoinHandle<()>>)> {
    match &config.redis_url {
        Some(url) => {
            let backend = RedisBackend::connect(url)
                .await
                .context("connecting to Redis")?;
            info!("Redis cache store connected");
            Ok((Arc::new(backend), None))
        }
        None => {
            let backend = MemoryBackend::new(config.max_entries);
            let handle = spawn_cleanup_task(backend.store(), config.cleanup_interval);
            info!(
                "In-process cache store initialized: max_entries={}",
                config.max_entries
            );
            Ok((Arc::new(backend), Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
