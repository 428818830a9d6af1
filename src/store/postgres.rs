use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{StoreError, TodoStore, UserStore};
use crate::config::DatabaseConfig;
use crate::models::{Todo, User};

/// PostgreSQL-backed store. All statements are parameterized.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and applies pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("migration failed: {}", e)))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
            .bind(&user.username)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Duplicate("username".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn list_todos(
        &self,
        owner: &str,
        complete: Option<bool>,
    ) -> Result<Vec<Todo>, StoreError> {
        let todos = match complete {
            Some(complete) => {
                sqlx::query_as::<_, Todo>(
                    "SELECT id, username, complete, todo FROM todos \
                     WHERE username = $1 AND complete = $2",
                )
                .bind(owner)
                .bind(complete)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Todo>(
                    "SELECT id, username, complete, todo FROM todos WHERE username = $1",
                )
                .bind(owner)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(todos)
    }

    async fn insert_todo(&self, todo: &Todo) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO todos (id, username, complete, todo) VALUES ($1, $2, $3, $4)")
            .bind(&todo.id)
            .bind(&todo.username)
            .bind(todo.complete)
            .bind(&todo.todo)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_todo(&self, owner: &str, id: &str) -> Result<Option<Todo>, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, username, complete, todo FROM todos WHERE id = $1 AND username = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn set_text(&self, owner: &str, id: &str, text: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE todos SET todo = $1 WHERE id = $2 AND username = $3")
            .bind(text)
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn set_complete(
        &self,
        owner: &str,
        id: &str,
        complete: bool,
    ) -> Result<u64, StoreError> {
        let result =
            sqlx::query("UPDATE todos SET complete = $1 WHERE id = $2 AND username = $3")
                .bind(complete)
                .bind(id)
                .bind(owner)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    async fn delete_todo(&self, owner: &str, id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND username = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
