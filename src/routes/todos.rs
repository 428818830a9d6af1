use crate::{
    auth::{AuthMiddleware, AuthenticatedUser},
    error::AppError,
    models::{NewTodo, TodoId, TodoList, TodoQuery, TodoUpdate},
    services::TodoGateway,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Lists the authenticated user's to-do items.
///
/// ## Query Parameters:
/// - `complete` (optional): `true` or `false`. Any other non-empty value is
///   rejected.
///
/// ## Responses:
/// - `200 OK`: `{"todos": [...]}` in no particular order.
/// - `400 Bad Request`: `"invalid query string"`.
#[get("/todos", wrap = "AuthMiddleware")]
pub async fn list_todos(
    todos: web::Data<TodoGateway>,
    user: AuthenticatedUser,
    query: Result<web::Query<TodoQuery>, actix_web::Error>,
) -> Result<impl Responder, AppError> {
    let query = query.map_err(|_| AppError::BadRequest("invalid query string".into()))?;
    let todos = todos.list(user.username(), query.complete.as_deref()).await?;

    Ok(HttpResponse::Ok().json(TodoList { todos }))
}

/// Creates a to-do item owned by the authenticated user.
///
/// ## Request Body:
/// - `todo`: the task text (required, non-empty).
/// - `complete` (optional): defaults to `false`.
///
/// ## Responses:
/// - `201 Created`: `{"id": "..."}`
/// - `400 Bad Request`: `"wrong todo format"`.
#[post("/todo", wrap = "AuthMiddleware")]
pub async fn add_todo(
    todos: web::Data<TodoGateway>,
    user: AuthenticatedUser,
    body: Result<web::Json<NewTodo>, actix_web::Error>,
) -> Result<impl Responder, AppError> {
    let body = body.map_err(|_| AppError::BadRequest("wrong todo format".into()))?;
    let id = todos.add(user.username(), &body.todo, body.complete).await?;

    Ok(HttpResponse::Created().json(TodoId { id }))
}

/// Retrieves one to-do item.
///
/// ## Responses:
/// - `200 OK`: `{"id", "username", "complete", "todo"}`
/// - `404 Not Found`: no such id for this user (including ids owned by
///   someone else).
#[get("/todo/{id}", wrap = "AuthMiddleware")]
pub async fn get_todo(
    todos: web::Data<TodoGateway>,
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let todo = todos.get(user.username(), &id).await?;

    Ok(HttpResponse::Ok().json(todo))
}

/// Updates a to-do item.
///
/// ## Request Body:
/// - `todo` (optional): new text; omitted or empty keeps the current text.
/// - `complete`: always written (missing means `false`).
///
/// ## Responses:
/// - `200 OK`: the values that were written. Also returned when the id does
///   not exist or belongs to someone else, in which case nothing changes.
/// - `400 Bad Request`: `"wrong task format"`.
#[put("/todo/{id}", wrap = "AuthMiddleware")]
pub async fn update_todo(
    todos: web::Data<TodoGateway>,
    user: AuthenticatedUser,
    id: web::Path<String>,
    body: Result<web::Json<TodoUpdate>, actix_web::Error>,
) -> Result<impl Responder, AppError> {
    let body = body.map_err(|_| AppError::BadRequest("wrong task format".into()))?;
    let outcome = todos
        .update(user.username(), &id, body.todo.as_deref(), body.complete)
        .await?;

    Ok(HttpResponse::Ok().json(outcome.todo))
}

/// Deletes a to-do item.
///
/// ## Responses:
/// - `200 OK`: `{"id": "..."}`, whether or not a row was removed.
#[delete("/todo/{id}", wrap = "AuthMiddleware")]
pub async fn delete_todo(
    todos: web::Data<TodoGateway>,
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = id.into_inner();
    todos.delete(user.username(), &id).await?;

    Ok(HttpResponse::Ok().json(TodoId { id }))
}
