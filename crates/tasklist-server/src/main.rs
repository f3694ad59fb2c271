//! Tasklist Server
//!
//! A small to-do list served as HTML pages and a JSON API, persisted in a
//! DynamoDB table (or SQLite / memory when configured so).

mod config;
mod error;
mod extractors;
mod handlers;
mod services;
mod storage;
mod templates;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tasklist_core::TaskStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{ServerConfig, StoreBackend};
use services::TaskManager;
use storage::{DynamoTaskStore, MemoryTaskStore, SqliteTaskStore};
use templates::Templates;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<TaskManager>,
    pub templates: Arc<Templates>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Tasklist Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: port={}, store={}",
        config.port, config.store
    );

    let store = open_store(&config).await?;
    store
        .ensure_table()
        .await
        .context("Failed to prepare task table")?;
    info!("Task table ready");

    let templates = Templates::new().context("Failed to parse page templates")?;

    let state = AppState {
        tasks: Arc::new(TaskManager::new(store)),
        templates: Arc::new(templates),
    };

    let app = build_router(state);

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn open_store(config: &ServerConfig) -> Result<Arc<dyn TaskStore>> {
    let store: Arc<dyn TaskStore> = match config.store {
        StoreBackend::Dynamodb => {
            let store = DynamoTaskStore::connect(config.table_name.clone()).await;
            info!(
                "Using DynamoDB table {} in {}",
                store.table_name(),
                storage::dynamo::REGION
            );
            Arc::new(store)
        }
        StoreBackend::Sqlite => {
            let store = SqliteTaskStore::open(&config.database_path)
                .await
                .context("Failed to open SQLite database")?;
            info!("Using SQLite database at {}", config.database_path);
            Arc::new(store)
        }
        StoreBackend::Memory => {
            info!("Using in-memory task store; tasks are lost on restart");
            Arc::new(MemoryTaskStore::new())
        }
    };
    Ok(store)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // HTML pages
        .route("/", get(handlers::pages::index).post(handlers::pages::create))
        .route(
            "/edit/:id",
            get(handlers::pages::edit_form).post(handlers::pages::edit),
        )
        .route("/delete/:id", post(handlers::pages::delete))
        // JSON API
        .nest("/api", api_routes())
        // Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tasks",
            get(handlers::api::list).post(handlers::api::create),
        )
        .route(
            "/tasks/:id",
            get(handlers::api::get)
                .put(handlers::api::update)
                .delete(handlers::api::delete),
        )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
