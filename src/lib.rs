#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "Holds the domain models, authentication (password hashing, bearer tokens and"]
#![doc = "the request guard), storage backends, gateways, routing and error handling of"]
#![doc = "the to-do service. The binary (`main.rs`) only wires configuration, the"]
#![doc = "Postgres pool and the HTTP server around it."]

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use crate::context::AppContext;
pub use crate::error::AppError;
