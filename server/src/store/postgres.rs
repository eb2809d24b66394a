//! PostgreSQL backend for the `todo(todo_id, text, status)` table.
//!
//! Every call runs against the pool, so a connection is checked out for the
//! duration of one statement and returned on every exit path.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{FromRow, Postgres, QueryBuilder};
use todo_core::{Status, Todo};
use tracing::debug;
use uuid::Uuid;

use super::{StoreError, TodoFilter, TodoStore};

const SELECT_TODOS: &str = "SELECT todo_id, text, status FROM todo";

#[derive(Debug, FromRow)]
struct TodoRow {
    todo_id: Uuid,
    text: String,
    status: String,
}

impl TryFrom<TodoRow> for Todo {
    type Error = StoreError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let status = row.status.trim().parse::<Status>().map_err(|_| StoreError::CorruptRow {
            id: row.todo_id,
            reason: format!("unknown status {:?}", row.status),
        })?;
        Ok(Todo {
            id: row.todo_id,
            text: row.text,
            status,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool that opens its first connection on first use.
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Append the `WHERE` clause for `filter`. Only fixed SQL is pushed as text;
/// user values always go through `push_bind`.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &TodoFilter) {
    let mut separator = " WHERE ";

    if let Some(text) = &filter.text {
        builder
            .push(separator)
            .push("text LIKE ")
            .push_bind(format!("%{}%", escape_like(text)))
            .push(" ESCAPE '\\'");
        separator = " AND ";
    }

    if let Some(status) = filter.status {
        builder
            .push(separator)
            .push("status = ")
            .push_bind(status.as_str());
    }
}

/// Escape `LIKE` metacharacters so the text is matched literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn create(&self, todo: &Todo) -> Result<(), StoreError> {
        debug!(todo_id = %todo.id, "Inserting todo");

        sqlx::query("INSERT INTO todo (todo_id, text, status) VALUES ($1, $2, $3)")
            .bind(todo.id)
            .bind(&todo.text)
            .bind(todo.status.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        debug!(todo_id = %id, "Fetching todo");

        let row = sqlx::query_as::<_, TodoRow>(
            "SELECT todo_id, text, status FROM todo WHERE todo_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Todo::try_from).transpose()
    }

    async fn list(&self, filter: &TodoFilter) -> Result<Vec<Todo>, StoreError> {
        debug!(?filter, "Listing todos");

        let mut builder = QueryBuilder::<Postgres>::new(SELECT_TODOS);
        push_filter(&mut builder, filter);

        let rows = builder
            .build_query_as::<TodoRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn update(&self, todo: &Todo) -> Result<Option<Todo>, StoreError> {
        debug!(todo_id = %todo.id, "Updating todo");

        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todo SET text = $1, status = $2
            WHERE todo_id = $3
            RETURNING todo_id, text, status
            "#,
        )
        .bind(&todo.text)
        .bind(todo.status.as_str())
        .bind(todo.id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Todo::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        debug!(todo_id = %id, "Deleting todo");

        let result = sqlx::query("DELETE FROM todo WHERE todo_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
