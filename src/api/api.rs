use actix_web::{self, middleware::Logger, web, App, HttpServer};

use crate::config::ServerConfig;
use crate::models::{self, Pool};

use super::todos_handler;

/// Registers the `/api/todo` routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api").service(
            web::scope("/todo")
                .route("", web::get().to(todos_handler::get_todos))
                .route("", web::post().to(todos_handler::create_todo))
                .route("/{id}", web::put().to(todos_handler::update_todo))
                .route("/{id}", web::delete().to(todos_handler::delete_todo)),
        ),
    );
}

/// Blocks the current thread running the api server until it is shut down
pub fn start_server(config: ServerConfig) -> std::io::Result<()> {
    actix_web::rt::System::new().block_on(run_server(config))
}

async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let pool: Pool = models::build_pool(&config.database_url, config.pool_size)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    models::run_migrations(&pool)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!(
        "Serving todos from {} on {}",
        config.database_url,
        config.bind_address
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .configure(configure)
    })
    .workers(config.workers) // Num of threads
    .bind(config.bind_address.as_str())?
    .run()
    .await
}
