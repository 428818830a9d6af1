use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{StoreError, TodoStore, UserStore};
use crate::models::{Todo, User};

/// In-process store with the same semantics as [`super::PgStore`], including
/// the rule that a todo's owner must be an existing user.
///
/// Backs the unit and HTTP test suites.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    todos: RwLock<HashMap<String, Todo>>,
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read()
        .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write()
        .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `change` to the todo with `id` if `owner` owns it.
    fn modify<F>(&self, owner: &str, id: &str, change: F) -> Result<u64, StoreError>
    where
        F: FnOnce(&mut Todo),
    {
        let mut todos = write(&self.todos)?;
        match todos.get_mut(id) {
            Some(todo) if todo.username == owner => {
                change(todo);
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = write(&self.users)?;
        if users.contains_key(&user.username) {
            return Err(StoreError::Duplicate("username".into()));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(read(&self.users)?.get(username).cloned())
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list_todos(
        &self,
        owner: &str,
        complete: Option<bool>,
    ) -> Result<Vec<Todo>, StoreError> {
        let todos = read(&self.todos)?;
        Ok(todos
            .values()
            .filter(|t| t.username == owner)
            .filter(|t| complete.map_or(true, |c| t.complete == c))
            .cloned()
            .collect())
    }

    async fn insert_todo(&self, todo: &Todo) -> Result<(), StoreError> {
        if !read(&self.users)?.contains_key(&todo.username) {
            return Err(StoreError::Unavailable(format!(
                "todo owner {} is not a known user",
                todo.username
            )));
        }

        let mut todos = write(&self.todos)?;
        if todos.contains_key(&todo.id) {
            return Err(StoreError::Duplicate("id".into()));
        }
        todos.insert(todo.id.clone(), todo.clone());
        Ok(())
    }

    async fn find_todo(&self, owner: &str, id: &str) -> Result<Option<Todo>, StoreError> {
        Ok(read(&self.todos)?
            .get(id)
            .filter(|t| t.username == owner)
            .cloned())
    }

    async fn set_text(&self, owner: &str, id: &str, text: &str) -> Result<u64, StoreError> {
        self.modify(owner, id, |todo| todo.todo = text.to_string())
    }

    async fn set_complete(
        &self,
        owner: &str,
        id: &str,
        complete: bool,
    ) -> Result<u64, StoreError> {
        self.modify(owner, id, |todo| todo.complete = complete)
    }

    async fn delete_todo(&self, owner: &str, id: &str) -> Result<u64, StoreError> {
        let mut todos = write(&self.todos)?;
        let owned = todos.get(id).map_or(false, |t| t.username == owner);
        if !owned {
            return Ok(0);
        }
        todos.remove(id);
        Ok(1)
    }
}
