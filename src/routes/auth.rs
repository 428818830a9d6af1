use crate::{
    auth::{AuthResponse, Credentials},
    error::AppError,
    services::AccountGateway,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates the account and returns a bearer token for it.
///
/// ## Responses:
/// - `201 Created`: `{"token": "..."}`
/// - `400 Bad Request`: body is not `{username, password}` or a field is empty.
/// - `409 Conflict`: the username is taken.
#[post("/sign-up")]
pub async fn sign_up(
    accounts: web::Data<AccountGateway>,
    body: Result<web::Json<Credentials>, actix_web::Error>,
) -> Result<impl Responder, AppError> {
    let credentials = body.map_err(|_| AppError::BadRequest("invalid inputs".into()))?;
    let token = accounts.register(&credentials).await?;

    Ok(HttpResponse::Created().json(AuthResponse { token }))
}

/// Sign in
///
/// ## Responses:
/// - `200 OK`: `{"token": "..."}`
/// - `400 Bad Request`: malformed body, empty field, or `"sign in failed"`
///   for an unknown user or a wrong password alike.
#[post("/sign-in")]
pub async fn sign_in(
    accounts: web::Data<AccountGateway>,
    body: Result<web::Json<Credentials>, actix_web::Error>,
) -> Result<impl Responder, AppError> {
    let credentials = body.map_err(|_| AppError::BadRequest("invalid inputs".into()))?;
    let token = accounts.sign_in(&credentials).await?;

    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}
