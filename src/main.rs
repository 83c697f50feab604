// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, document store, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use services::SeedService;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting karnataka-places service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize document store
    let store = match config::init_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to initialize document store: {:#}", e);
            std::process::exit(1);
        }
    };
    log::info!("Document store backend: {}", store.backend());

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let store = web::Data::new(store);
    let seeder = web::Data::new(SeedService::new());
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            // Application state (document store, seed guard, config)
            .app_data(store.clone())
            .app_data(seeder.clone())
            .app_data(config.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::places_config)
            .configure(handlers::seed_config)
            .default_service(web::route().to(handlers::health::not_found))
    })
    .bind(&server_addr)?
    .run()
    .await
}
