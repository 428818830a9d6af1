use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// One-way password hashing backed by bcrypt.
///
/// The salt is generated per call and embedded in the returned hash string, so
/// only the hash ever needs to be persisted.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Creates a hasher with the given bcrypt work factor (`MIN_COST..=MAX_COST`).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost).map_err(AppError::from)
    }

    /// Returns `false` on mismatch and on a malformed stored hash.
    pub fn verify_password(&self, password: &str, hashed_password: &str) -> bool {
        verify(password, hashed_password).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}
