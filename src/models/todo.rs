use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

/// A to-do item as stored in the `todos` table and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Server-generated identifier (UUID v4 text).
    pub id: String,
    /// Owner of the item. Set at creation and never changed.
    pub username: String,
    /// Whether the item is done.
    pub complete: bool,
    /// The task text.
    pub todo: String,
}

impl Todo {
    /// Builds a new item for `username` with a freshly generated id.
    pub fn new(username: &str, text: String, complete: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            complete,
            todo: text,
        }
    }
}

/// Body of `POST /todo`. Empty text is rejected by the gateway.
#[derive(Debug, Deserialize)]
pub struct NewTodo {
    pub todo: String,
    #[serde(default)]
    pub complete: bool,
}

/// Body of `PUT /todo/{id}`.
///
/// `todo` is optional: when absent or empty the stored text is left alone.
/// `complete` is always written; a missing field means `false`.
#[derive(Debug, Deserialize)]
pub struct TodoUpdate {
    #[serde(default)]
    pub todo: Option<String>,
    #[serde(default)]
    pub complete: bool,
}

/// Raw query string of `GET /todos`.
#[derive(Debug, Deserialize)]
pub struct TodoQuery {
    pub complete: Option<String>,
}

/// Completion filter applied when listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionFilter {
    All,
    Complete,
    Incomplete,
}

impl CompletionFilter {
    /// Parses the `complete` query value. Absent and empty both mean "no
    /// filter"; anything other than `true`/`false` is rejected.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw {
            None | Some("") => Ok(CompletionFilter::All),
            Some("true") => Ok(CompletionFilter::Complete),
            Some("false") => Ok(CompletionFilter::Incomplete),
            Some(_) => Err(AppError::BadRequest("invalid query string".into())),
        }
    }

    /// The completion value rows must have, or `None` for no filter.
    pub fn as_complete(self) -> Option<bool> {
        match self {
            CompletionFilter::All => None,
            CompletionFilter::Complete => Some(true),
            CompletionFilter::Incomplete => Some(false),
        }
    }
}

/// Response body of `GET /todos`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

/// Response body carrying only an id (`POST /todo`, `DELETE /todo/{id}`).
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoId {
    pub id: String,
}
