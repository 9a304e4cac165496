//! HTTP API Module
//!
//! The outward-facing boundary of the tour service: an axum router that
//! exposes the tour configuration to browser clients, plus the listener
//! setup around it.
//!
//! # Structure
//!
//! - [`tours`]: `GET /api/tours` and `GET /api/tours/{tour_id}`
//!
//! Handlers read the configuration from disk on every request rather than
//! holding a parsed catalog, so the served definitions always match the
//! file on disk.

pub mod tours;

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::routing::get;
use axum::{Json, Router};
use log::info;
use tower_http::cors::{Any, CorsLayer};

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// Location of the tour configuration document.
    pub tours_path: PathBuf,
}

/// Listener and content settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub tours_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3100,
            tours_path: PathBuf::from("config/tours.yaml"),
        }
    }
}

/// Builds the full API router, health endpoint included.
pub fn api_router() -> Router<ApiState> {
    Router::new()
        .nest("/api/tours", tours::router())
        .route("/api/health", get(health))
}

/// Binds the listener and serves the API until the process exits.
///
/// # Arguments
///
/// * `config` - Address to bind and the configuration file to serve
///
/// # Returns
///
/// * `Ok(())` once the server shuts down
/// * `Err` if the address cannot be parsed or bound
pub async fn serve(config: ServerConfig) -> Result<(), Box<dyn Error>> {
    // The portal frontend is served from a different origin in development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api_router()
        .layer(cors)
        .with_state(ApiState {
            tours_path: config.tours_path,
        });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Tour API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "tourguide",
        "version": crate::VERSION,
    }))
}
