use actix_web::web;
use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenService};
use crate::error::AppError;
use crate::routes;
use crate::services::{AccountGateway, TodoGateway};
use crate::store::{MemoryStore, TodoStore, UserStore};

/// Everything a request handler needs, built once at startup.
///
/// Cloning is cheap: every field is an `Arc` shared by all workers.
#[derive(Clone)]
pub struct AppContext {
    tokens: web::Data<TokenService>,
    accounts: web::Data<AccountGateway>,
    todos: web::Data<TodoGateway>,
}

impl AppContext {
    /// Fails only when the hasher's cost is rejected by bcrypt.
    pub fn new(
        jwt_secret: &str,
        hasher: PasswordHasher,
        users: Arc<dyn UserStore>,
        todos: Arc<dyn TodoStore>,
    ) -> Result<Self, AppError> {
        let tokens = Arc::new(TokenService::new(jwt_secret));
        let accounts = AccountGateway::new(users, tokens.clone(), hasher)?;

        Ok(Self {
            accounts: web::Data::new(accounts),
            todos: web::Data::new(TodoGateway::new(todos)),
            tokens: web::Data::from(tokens),
        })
    }

    /// A context backed by a fresh [`MemoryStore`].
    pub fn in_memory(jwt_secret: &str, hasher: PasswordHasher) -> Result<Self, AppError> {
        let store = Arc::new(MemoryStore::new());
        Self::new(jwt_secret, hasher, store.clone(), store)
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Registers the shared state and every route on an actix-web app.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.tokens.clone())
            .app_data(self.accounts.clone())
            .app_data(self.todos.clone())
            .configure(routes::config);
    }
}
