use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::TokenService;
use crate::error::AppError;

/// Literal scheme prefix required in the `Authorization` header.
pub const BEARER_SCHEME: &str = "BEARER ";

/// Guards a route behind a valid bearer token.
///
/// The header must read `BEARER <token>` exactly (the scheme is
/// case-sensitive). A missing or too-short header is rejected with 400, a
/// token that fails verification with 401; in both cases the wrapped handler
/// never runs. On success the verified username is stored in the request
/// extensions as an [`AuthenticatedUser`].
///
/// The `TokenService` is read from application data, so the app must register
/// a `web::Data<TokenService>`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

/// Pulls the token out of an `Authorization` header value.
pub fn extract_bearer(value: Option<&str>) -> Result<&str, AppError> {
    match value {
        Some(value) if value.len() > BEARER_SCHEME.len() => value
            .strip_prefix(BEARER_SCHEME)
            .ok_or_else(|| AppError::BadRequest("invalid token".into())),
        _ => Err(AppError::BadRequest("invalid token".into())),
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let verified = authenticate(&req);

        match verified {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                let response = req.into_response(app_err.error_response());
                Box::pin(async move { Ok(response.map_into_right_body()) })
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = extract_bearer(header_value)?;

    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::InternalServerError("TokenService is not configured".into()))?;

    let username = tokens.verify(token)?;
    Ok(AuthenticatedUser(username))
}
