//! Data access for todos.
//!
//! # Design
//! Handlers only see the `TodoStore` trait. `PgTodoStore` is the production
//! backend; `MemoryTodoStore` mirrors its semantics in process for tests and
//! for running without a database. `main` builds one and hands it to the
//! router inside `AppState`.

mod memory;
mod postgres;

pub use memory::MemoryTodoStore;
pub use postgres::PgTodoStore;

use async_trait::async_trait;
use thiserror::Error;
use todo_core::{Status, Todo};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("todo {0} already exists")]
    DuplicateId(Uuid),

    #[error("stored row for todo {id} is invalid: {reason}")]
    CorruptRow { id: Uuid, reason: String },
}

/// Optional filters for listing. Both present means both must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Case-sensitive substring of the todo text, matched literally.
    pub text: Option<String>,
    pub status: Option<Status>,
}

impl TodoFilter {
    pub fn new(text: Option<String>, status: Option<Status>) -> Self {
        Self {
            text: text.filter(|t| !t.is_empty()),
            status,
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        let text_ok = self
            .text
            .as_deref()
            .map_or(true, |needle| todo.text.contains(needle));
        let status_ok = self.status.map_or(true, |s| todo.status == s);
        text_ok && status_ok
    }
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create(&self, todo: &Todo) -> Result<(), StoreError>;

    /// `None` when no todo has this id.
    async fn get(&self, id: Uuid) -> Result<Option<Todo>, StoreError>;

    /// Todos in storage order; no sorting is applied.
    async fn list(&self, filter: &TodoFilter) -> Result<Vec<Todo>, StoreError>;

    /// Replace text and status of an existing todo. Never inserts; returns
    /// `None` when the id is unknown.
    async fn update(&self, todo: &Todo) -> Result<Option<Todo>, StoreError>;

    /// `true` only if exactly one row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
