#![allow(dead_code)]

use actix_http::Request;
use actix_web::{
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test, App, Error,
};
use serde_json::{json, Value};
use todo_api::auth::password::{PasswordHasher, MIN_COST};
use todo_api::AppContext;

pub const SECRET: &str = "integration_test_secret";

/// A fresh in-memory context with the cheapest bcrypt cost.
pub fn context() -> AppContext {
    AppContext::in_memory(SECRET, PasswordHasher::new(MIN_COST)).unwrap()
}

pub async fn init_app(
    ctx: AppContext,
) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    test::init_service(App::new().configure(move |cfg| ctx.configure(cfg))).await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("BEARER {}", token))
}

pub async fn post_credentials<S>(app: &S, uri: &str, username: &str, password: &str) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    test::call_service(app, req).await
}

/// Signs up `username` and returns the issued token.
pub async fn register<S>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let resp = post_credentials(app, "/sign-up", username, password).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "sign-up of {} failed", username);

    let body: Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("sign-up response carries a token")
        .to_string()
}

/// Creates a todo and returns its id.
pub async fn add_todo<S>(app: &S, token: &str, text: &str, complete: bool) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/todo")
        .insert_header(bearer(token))
        .set_json(json!({ "todo": text, "complete": complete }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    body["id"].as_str().expect("add response carries an id").to_string()
}

/// Sends an authenticated request and returns the status with the JSON body.
pub async fn send<S>(app: &S, token: &str, req: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let resp = test::call_service(app, req.insert_header(bearer(token)).to_request()).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}
