use std::sync::Arc;

use crate::error::AppError;
use crate::models::{CompletionFilter, Todo};
use crate::store::TodoStore;

/// Result of an update.
///
/// `todo` echoes the values the caller asked for, not a re-read of the row.
/// `matched` is false when the id is unknown or owned by someone else; the
/// HTTP layer still answers 200 in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub todo: Todo,
    pub matched: bool,
}

/// Owner-scoped CRUD over to-do items.
///
/// `owner` is always the username bound by the auth middleware.
pub struct TodoGateway {
    todos: Arc<dyn TodoStore>,
}

impl TodoGateway {
    pub fn new(todos: Arc<dyn TodoStore>) -> Self {
        Self { todos }
    }

    /// Lists the owner's items, optionally filtered by the raw `complete`
    /// query value (`"true"` or `"false"`).
    pub async fn list(&self, owner: &str, complete: Option<&str>) -> Result<Vec<Todo>, AppError> {
        let filter = CompletionFilter::parse(complete)?;
        Ok(self.todos.list_todos(owner, filter.as_complete()).await?)
    }

    /// Stores a new item and returns its generated id.
    pub async fn add(&self, owner: &str, text: &str, complete: bool) -> Result<String, AppError> {
        if text.is_empty() {
            return Err(AppError::BadRequest("wrong todo format".into()));
        }

        let todo = Todo::new(owner, text.to_string(), complete);
        self.todos.insert_todo(&todo).await?;
        log::debug!("{} added todo {}", owner, todo.id);

        Ok(todo.id)
    }

    /// Fetches one item. Someone else's item is reported as not found.
    pub async fn get(&self, owner: &str, id: &str) -> Result<Todo, AppError> {
        self.todos
            .find_todo(owner, id)
            .await?
            .ok_or_else(|| AppError::NotFound("todo not found".into()))
    }

    /// Sets the text when `text` is non-empty, then always sets `complete`.
    ///
    /// The two writes are separate statements without a transaction.
    pub async fn update(
        &self,
        owner: &str,
        id: &str,
        text: Option<&str>,
        complete: bool,
    ) -> Result<UpdateOutcome, AppError> {
        let text = text.unwrap_or_default();
        if !text.is_empty() {
            self.todos.set_text(owner, id, text).await?;
        }
        let matched = self.todos.set_complete(owner, id, complete).await? > 0;
        if !matched {
            log::debug!("update of todo {} by {} matched no rows", id, owner);
        }

        Ok(UpdateOutcome {
            todo: Todo {
                id: id.to_string(),
                username: owner.to_string(),
                complete,
                todo: text.to_string(),
            },
            matched,
        })
    }

    /// Deletes an item. Returns whether a row was removed; a missing or
    /// foreign id is not an error.
    pub async fn delete(&self, owner: &str, id: &str) -> Result<bool, AppError> {
        let removed = self.todos.delete_todo(owner, id).await? > 0;
        if !removed {
            log::debug!("delete of todo {} by {} matched no rows", id, owner);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::store::{MemoryStore, UserStore};
    use pretty_assertions::assert_eq;

    async fn gateway() -> TodoGateway {
        let store = Arc::new(MemoryStore::new());
        for owner in ["alice", "bob"] {
            store
                .insert_user(&User::new(owner, "hash".into()))
                .await
                .unwrap();
        }
        TodoGateway::new(store)
    }

    #[actix_rt::test]
    async fn test_add_then_get() {
        let todos = gateway().await;
        let id = todos.add("alice", "Buy milk", false).await.unwrap();

        let todo = todos.get("alice", &id).await.unwrap();
        assert_eq!(
            todo,
            Todo {
                id: id.clone(),
                username: "alice".into(),
                complete: false,
                todo: "Buy milk".into(),
            }
        );
    }

    #[actix_rt::test]
    async fn test_add_rejects_empty_text() {
        let todos = gateway().await;
        assert_eq!(
            todos.add("alice", "", false).await.unwrap_err(),
            AppError::BadRequest("wrong todo format".into())
        );
        assert!(todos.list("alice", None).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_foreign_todo_is_not_found() {
        let todos = gateway().await;
        let id = todos.add("bob", "Bob's", false).await.unwrap();

        let foreign = todos.get("alice", &id).await.unwrap_err();
        let missing = todos.get("alice", "does-not-exist").await.unwrap_err();
        assert_eq!(foreign, AppError::NotFound("todo not found".into()));
        assert_eq!(foreign, missing);
    }

    #[actix_rt::test]
    async fn test_update_with_empty_text_only_sets_completion() {
        let todos = gateway().await;
        let id = todos.add("alice", "Original", false).await.unwrap();

        let outcome = todos.update("alice", &id, Some(""), true).await.unwrap();
        assert!(outcome.matched);

        let stored = todos.get("alice", &id).await.unwrap();
        assert_eq!(stored.todo, "Original");
        assert!(stored.complete);

        todos.update("alice", &id, None, false).await.unwrap();
        let stored = todos.get("alice", &id).await.unwrap();
        assert_eq!(stored.todo, "Original");
        assert!(!stored.complete);
    }

    #[actix_rt::test]
    async fn test_update_sets_text_and_completion() {
        let todos = gateway().await;
        let id = todos.add("alice", "Original", true).await.unwrap();

        let outcome = todos
            .update("alice", &id, Some("Changed"), true)
            .await
            .unwrap();
        assert_eq!(outcome.todo.todo, "Changed");

        let stored = todos.get("alice", &id).await.unwrap();
        assert_eq!(stored.todo, "Changed");
        assert!(stored.complete);
    }

    #[actix_rt::test]
    async fn test_update_of_foreign_todo_matches_nothing() {
        let todos = gateway().await;
        let id = todos.add("bob", "Bob's", false).await.unwrap();

        let outcome = todos
            .update("alice", &id, Some("hijacked"), true)
            .await
            .unwrap();
        assert!(!outcome.matched);
        assert_eq!(outcome.todo.username, "alice");
        assert_eq!(outcome.todo.todo, "hijacked");

        let stored = todos.get("bob", &id).await.unwrap();
        assert_eq!(stored.todo, "Bob's");
        assert!(!stored.complete);
    }

    #[actix_rt::test]
    async fn test_update_of_unknown_id_matches_nothing() {
        let todos = gateway().await;
        let id = todos.add("alice", "Keep me", false).await.unwrap();

        let outcome = todos
            .update("alice", "never-existed", Some("ghost"), true)
            .await
            .unwrap();
        assert!(!outcome.matched);
        assert_eq!(
            outcome.todo,
            Todo {
                id: "never-existed".into(),
                username: "alice".into(),
                complete: true,
                todo: "ghost".into(),
            }
        );

        assert!(matches!(
            todos.get("alice", "never-existed").await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(todos.list("alice", None).await.unwrap().len(), 1);
        assert_eq!(todos.get("alice", &id).await.unwrap().todo, "Keep me");
    }

    #[actix_rt::test]
    async fn test_delete_is_idempotent() {
        let todos = gateway().await;
        let id = todos.add("alice", "Temp", false).await.unwrap();

        assert!(todos.delete("alice", &id).await.unwrap());
        assert!(!todos.delete("alice", &id).await.unwrap());
        assert!(!todos.delete("alice", "never-existed").await.unwrap());
        assert!(matches!(
            todos.get("alice", &id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn test_delete_of_foreign_todo_keeps_it() {
        let todos = gateway().await;
        let id = todos.add("bob", "Bob's", false).await.unwrap();

        assert!(!todos.delete("alice", &id).await.unwrap());
        assert!(todos.get("bob", &id).await.is_ok());
    }

    #[actix_rt::test]
    async fn test_list_filters_by_owner_and_completion() {
        let todos = gateway().await;
        let done = todos.add("alice", "done", true).await.unwrap();
        let open = todos.add("alice", "open", false).await.unwrap();
        todos.add("bob", "bob done", true).await.unwrap();

        let all = todos.list("alice", None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|t| t.username == "alice"));

        let complete = todos.list("alice", Some("true")).await.unwrap();
        assert_eq!(complete.len(), 1);
        assert_eq!(complete[0].id, done);

        let incomplete = todos.list("alice", Some("false")).await.unwrap();
        assert_eq!(incomplete.len(), 1);
        assert_eq!(incomplete[0].id, open);

        assert_eq!(todos.list("alice", Some("")).await.unwrap().len(), 2);
    }

    #[actix_rt::test]
    async fn test_list_rejects_unknown_filter() {
        let todos = gateway().await;
        assert_eq!(
            todos.list("alice", Some("yes")).await.unwrap_err(),
            AppError::BadRequest("invalid query string".into())
        );
    }
}
