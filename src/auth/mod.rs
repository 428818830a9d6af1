pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use token::{Claims, TokenError, TokenService};

/// Payload of both `POST /sign-up` and `POST /sign-in`.
///
/// Only presence is checked: both fields must be non-empty.
#[derive(Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// Hand-written so the password never shows up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response body after successful sign-up or sign-in.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The bearer token to send as `Authorization: BEARER <token>`.
    pub token: String,
}
