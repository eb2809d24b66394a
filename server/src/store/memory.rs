use async_trait::async_trait;
use todo_core::Todo;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, TodoFilter, TodoStore};

/// In-process store. Keeps insertion order so listing behaves like a table
/// scan without `ORDER BY`.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn create(&self, todo: &Todo) -> Result<(), StoreError> {
        let mut todos = self.todos.write().await;
        if todos.iter().any(|t| t.id == todo.id) {
            return Err(StoreError::DuplicateId(todo.id));
        }
        todos.push(todo.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self, filter: &TodoFilter) -> Result<Vec<Todo>, StoreError> {
        let todos = self.todos.read().await;
        Ok(todos.iter().filter(|t| filter.matches(t)).cloned().collect())
    }

    async fn update(&self, todo: &Todo) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        let Some(existing) = todos.iter_mut().find(|t| t.id == todo.id) else {
            return Ok(None);
        };
        existing.text = todo.text.clone();
        existing.status = todo.status;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        Ok(before - todos.len() == 1)
    }
}
