// src/main.rs
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use market_structure::api::configure_routes;
use market_structure::config::ServerConfig;
use market_structure::StructureAnalysisEngine;

fn init_logging() {
    // log4rs.yaml is optional; without it we log to stdout via env_logger.
    if let Err(e) = log4rs::init_file("log4rs.yaml", Default::default()) {
        env_logger::init_from_env(
            env_logger::Env::new().default_filter_or("market_structure=debug,info"),
        );
        log::warn!("log4rs.yaml not loaded ({}), using env_logger", e);
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    init_logging();

    let server_config = ServerConfig::from_env();
    let engine = web::Data::new(StructureAnalysisEngine::from_env());
    let host = server_config.host.clone();
    let port = server_config.port;

    log::info!("Starting server on http://{}:{}", host, port);
    log::info!("Available endpoints:");
    log::info!("  POST http://{}:{}/analyze", host, port);
    log::info!("  POST http://{}:{}/analyze/csv", host, port);
    log::info!("  GET  http://{}:{}/config", host, port);
    log::info!("  GET  http://{}:{}/health", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&server_config.cors_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);
        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(engine.clone())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
