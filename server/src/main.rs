use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use todo_server::{AppState, Config, MemoryTodoStore, PgTodoStore, TodoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn TodoStore> = match &config.database_url {
        Some(url) => {
            let store = PgTodoStore::connect_lazy(url, config.max_connections)
                .context("invalid DATABASE_URL")?;
            info!(max_connections = config.max_connections, "Using PostgreSQL store");
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set, todos are kept in memory only");
            Arc::new(MemoryTodoStore::new())
        }
    };

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    todo_server::run(listener, AppState::new(store)).await?;
    Ok(())
}
