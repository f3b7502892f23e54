mod auth;
mod config;
mod db;
mod error;
#[cfg(test)]
#[macro_use]
mod testing;
mod services;

use crate::config::Config;
use crate::db::Database;
use crate::error::ApiError;
use actix_files::NamedFile;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, ResponseError};
use env_logger::Env;
use log::{error, info};
use std::path::{Component, Path};

/// Serves the built frontend. Unknown `/api` paths get the JSON 404; any
/// other path that is not a file falls back to `index.html` so client-side
/// routes resolve.
async fn serve_frontend(req: HttpRequest, config: web::Data<Config>) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    if path == "api" || path.starts_with("api/") {
        return ApiError::NotFound("Route not found".to_string()).error_response();
    }

    let root = Path::new(&config.static_dir);
    let relative = Path::new(if path.is_empty() { "index.html" } else { path });
    let escapes_root = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    let candidate = root.join(relative);
    let file = if !escapes_root && candidate.is_file() {
        candidate
    } else {
        root.join("index.html")
    };

    match NamedFile::open_async(&file).await {
        Ok(file) => file.into_response(&req),
        Err(_) => HttpResponse::NotFound().body("Not Found"),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };
    let db = Database::open(&config.database_path).map_err(|e| {
        error!("cannot open database {}: {}", config.database_path, e);
        std::io::Error::other(e.to_string())
    })?;

    let host = config.host.clone();
    let port = config.port;
    if Path::new(&config.static_dir).is_dir() {
        info!("serving frontend from {}", config.static_dir);
    } else {
        info!("{} not found, serving the API only", config.static_dir);
    }
    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(|cfg| services::configure(cfg, db.clone(), config.clone()))
            .default_service(web::route().to(serve_frontend))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
