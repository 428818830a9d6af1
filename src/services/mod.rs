pub mod accounts;
pub mod todos;

pub use accounts::AccountGateway;
pub use todos::{TodoGateway, UpdateOutcome};
