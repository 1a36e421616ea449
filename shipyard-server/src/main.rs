#![deny(missing_docs)]
//! Shipyard server executable.
//!
//! Serves the ship registry over HTTP.

mod config;
mod dto;
mod openapi;
mod routes;
mod uri;
mod version;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;
#[cfg(not(test))]
use shipyard_core::{InMemoryShipRepository, RecordStore};

#[cfg(not(test))]
use crate::config::ServerConfig;
#[cfg(not(test))]
use crate::routes::{AppState, configure};
#[cfg(not(test))]
use crate::version::X_VERSION;

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()
        .map_err(|message| std::io::Error::new(std::io::ErrorKind::InvalidInput, message))?;
    let store = if config.seed {
        RecordStore::seeded()
    } else {
        RecordStore::new()
    };
    log::info!(
        "{} {} listening on {}:{} with {} ship(s)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.host,
        config.port,
        store.len()
    );
    let state = web::Data::new(AppState::new(InMemoryShipRepository::new(store)));

    let ServerConfig {
        host,
        port,
        allowed_origins,
        ..
    } = config;

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE])
                .allowed_header(X_VERSION)
                .expose_headers(vec![header::LOCATION])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .configure(configure)
        })
        .bind((host, port))?
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
