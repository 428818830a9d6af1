//! Persistence seams for users and to-do items.
//!
//! Gateways only see the [`UserStore`] and [`TodoStore`] traits. Every todo
//! method takes the owner username and filters on it, so a caller can never
//! reach a row belonging to somebody else.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;

use crate::models::{Todo, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Failures surfaced by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. Carries the field name.
    Duplicate(String),
    /// The backend could not serve the request.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Duplicate(what) => write!(f, "duplicate {}", what),
            StoreError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        StoreError::Unavailable(error.to_string())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. Fails with `Duplicate("username")` if taken.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// Owner-scoped access to the `todos` table.
///
/// The mutating methods return the number of rows they touched; zero means
/// the id does not exist or belongs to another owner.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn list_todos(&self, owner: &str, complete: Option<bool>)
        -> Result<Vec<Todo>, StoreError>;

    async fn insert_todo(&self, todo: &Todo) -> Result<(), StoreError>;

    async fn find_todo(&self, owner: &str, id: &str) -> Result<Option<Todo>, StoreError>;

    async fn set_text(&self, owner: &str, id: &str, text: &str) -> Result<u64, StoreError>;

    async fn set_complete(&self, owner: &str, id: &str, complete: bool)
        -> Result<u64, StoreError>;

    async fn delete_todo(&self, owner: &str, id: &str) -> Result<u64, StoreError>;
}
