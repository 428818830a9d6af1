use std::sync::Arc;
use validator::Validate;

use crate::auth::{Credentials, PasswordHasher, TokenService};
use crate::error::AppError;
use crate::models::User;
use crate::store::UserStore;

/// Registration and sign-in against the user table.
///
/// Both operations answer with a freshly issued bearer token; no password
/// material is ever returned or logged.
pub struct AccountGateway {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
    /// Verified against when the username is unknown, so a failed sign-in
    /// costs one bcrypt verification whether or not the user exists.
    dummy_hash: String,
}

impl AccountGateway {
    /// Builds the gateway. Hashes a throwaway password at the hasher's cost,
    /// which fails only if that cost is outside what bcrypt accepts.
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<TokenService>,
        hasher: PasswordHasher,
    ) -> Result<Self, AppError> {
        let dummy_hash = hasher.hash_password("unknown-user-placeholder")?;

        Ok(Self {
            users,
            tokens,
            hasher,
            dummy_hash,
        })
    }

    /// Creates a user and returns a token for it.
    ///
    /// Fails with `BadRequest` on empty fields and `Conflict` when the username
    /// is already taken.
    pub async fn register(&self, credentials: &Credentials) -> Result<String, AppError> {
        credentials.validate()?;

        let hasher = self.hasher;
        let password = credentials.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::InternalServerError(format!("hashing task failed: {}", e)))??;

        self.users
            .insert_user(&User::new(&credentials.username, password_hash))
            .await?;
        log::info!("registered user {}", credentials.username);

        Ok(self.tokens.issue(&credentials.username)?)
    }

    /// Checks the credentials and returns a token.
    ///
    /// An unknown username and a wrong password both yield
    /// `AppError::AuthenticationFailed`.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<String, AppError> {
        credentials.validate()?;

        let user = self.users.find_user(&credentials.username).await?;
        let known = user.is_some();
        let stored_hash = match user {
            Some(user) => user.password_hash,
            None => self.dummy_hash.clone(),
        };

        let hasher = self.hasher;
        let password = credentials.password.clone();
        let verified = tokio::task::spawn_blocking(move || {
            hasher.verify_password(&password, &stored_hash)
        })
        .await
        .map_err(|e| AppError::InternalServerError(format!("verification task failed: {}", e)))?;

        if !(known && verified) {
            log::info!("sign-in failed for {}", credentials.username);
            return Err(AppError::AuthenticationFailed);
        }

        Ok(self.tokens.issue(&credentials.username)?)
    }
}
