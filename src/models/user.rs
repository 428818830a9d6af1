use sqlx::FromRow;

/// A row of the `users` table.
///
/// Never serialized: the hash must not leave the server.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub username: String,
    pub password_hash: String,
}

impl User {
    pub fn new(username: &str, password_hash: String) -> Self {
        Self {
            username: username.to_string(),
            password_hash,
        }
    }
}
