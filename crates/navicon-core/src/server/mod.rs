//! HTTP surface: icon retrieval by id and the maintenance trigger.

mod error;
mod routes;

pub use error::ApiError;
pub use routes::ICON_CACHE_CONTROL;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Mutex;

use crate::batch::BatchOptions;
use crate::config::{check_icon_route, NaviconConfig};
use crate::favicon::{ResolveOptions, Resolver};
use crate::http::HttpClient;
use crate::store::Store;

use routes::{icon_handler, update_favicons_handler};

/// Shared state handed to every handler.
pub struct AppState {
    pub store: Store,
    pub resolver: Resolver<HttpClient, Store>,
    pub batch: BatchOptions,
    pub icon_route: String,
    /// Held for the whole of a batch run so triggers never overlap.
    pub batch_guard: Mutex<()>,
}

impl AppState {
    pub fn new(store: Store, cfg: &NaviconConfig) -> Arc<Self> {
        let resolver = Resolver::new(
            HttpClient::from_config(cfg),
            store.clone(),
            ResolveOptions::from_config(cfg),
        );
        Arc::new(Self {
            store,
            resolver,
            batch: BatchOptions::from_config(cfg),
            icon_route: cfg.icon_route().to_string(),
            batch_guard: Mutex::new(()),
        })
    }
}

/// Fails instead of panicking when `icon_route` cannot be mounted.
pub fn router(state: Arc<AppState>) -> Result<Router> {
    check_icon_route(&state.icon_route)?;
    let icon_path = format!("{}/{{id}}", state.icon_route);
    Ok(Router::new()
        .route(&icon_path, get(icon_handler))
        .route("/api/cron/update-favicons", post(update_favicons_handler))
        .with_state(state))
}

/// Serve on an already-bound listener until Ctrl-C / SIGTERM.
pub async fn serve_on(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    let app = router(state)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    tracing::info!("server shut down");
    Ok(())
}

pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    check_icon_route(&state.icon_route)?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!("server running on {}", listener.local_addr()?);
    serve_on(listener, state).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
