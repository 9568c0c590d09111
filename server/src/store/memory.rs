use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::TodoStore;
use crate::error::StoreError;
use crate::model::{NewTodo, Todo, TodoPatch};

/// In-process store. Lists in insertion order; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.todos.read().await.clone())
    }

    async fn insert(&self, input: NewTodo) -> Result<Todo, StoreError> {
        let todo = Todo::from_new(input);
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| t.id == id).cloned())
    }

    async fn update(&self, id: Uuid, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        Ok(todos.iter_mut().find(|t| t.id == id).map(|todo| {
            todo.apply(patch);
            todo.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        Ok(todos
            .iter()
            .position(|t| t.id == id)
            .map(|index| todos.remove(index)))
    }
}
