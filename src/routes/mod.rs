pub mod auth;
pub mod health;
pub mod todos;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(auth::sign_up)
        .service(auth::sign_in)
        .service(todos::list_todos)
        .service(todos::add_todo)
        .service(todos::get_todo)
        .service(todos::update_todo)
        .service(todos::delete_todo);
}
