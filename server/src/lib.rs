//! HTTP service exposing CRUD operations on todos.
//!
//! # Overview
//! `app` builds the axum router around an `AppState`; `run` serves it on a
//! bound listener. The binary in `main.rs` is the composition root: it reads
//! `Config`, picks a `TodoStore` backend and calls `run`.
//!
//! # Routes
//! - `POST /todo`, `GET /todo?q=&status=`
//! - `GET /todo/{id}`, `PUT /todo/{id}`, `DELETE /todo/{id}`
//! - `GET /health`

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod handlers;
pub mod store;

pub use config::Config;
pub use error::ApiError;
pub use store::{MemoryTodoStore, PgTodoStore, StoreError, TodoFilter, TodoStore};
pub use todo_core::{Status, Todo, TodoPayload};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTodoStore::new()))
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/todo", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/todo/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{addr}");
    }
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
