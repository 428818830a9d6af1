use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;

use todo_api::auth::PasswordHasher;
use todo_api::config::Config;
use todo_api::store::PgStore;
use todo_api::AppContext;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;
    log::debug!("Loaded configuration: {:?}", config);

    let store = PgStore::connect(&config.database).await.map_err(|e| {
        log::error!("Failed to connect to database: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;
    let store = Arc::new(store);

    let context = AppContext::new(
        &config.jwt_secret,
        PasswordHasher::new(config.bcrypt_cost),
        store.clone(),
        store,
    )
    .map_err(|e| {
        log::error!("Failed to build application context: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    log::info!("Starting todo-api server at {}", config.server_url());

    HttpServer::new(move || {
        let context = context.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| context.configure(cfg))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
