/*
 * Responsibility
 * - load Config → open the document store → build AppState and Router
 * - apply middleware (HTTP layers, CORS)
 * - serve until ctrl-c / SIGTERM, then close the store
 */
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StoreBackend};
use crate::services::auth::TokenService;
use crate::services::store::{DocumentStore, MemoryStore, PgDocumentStore};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set, e.g.
    // RUST_LOG=info,yoga_booking_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let store = open_store(&config).await?;
    let tokens = Arc::new(TokenService::new(&config.access_token_secret));
    let state = AppState::new(store.clone(), tokens);

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("document store closed, bye");
    Ok(())
}

async fn open_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("postgres backend requires a database url")?;
            Arc::new(PgDocumentStore::connect(url, config.db_max_connections).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory document store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    store.ping().await.context("document store ping failed")?;
    tracing::info!(backend = store.backend_name(), "connected to document store");

    Ok(store)
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes(state.clone()).with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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

    tracing::info!("shutdown signal received");
}
