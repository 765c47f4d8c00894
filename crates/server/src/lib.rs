//! AutoRoute HTTP Server
//!
//! Actix-web service that routes chat queries to FAQ vector search or the
//! chat model, and exposes the vector index for ingestion and search.

mod error;
pub mod metrics;
pub mod routes;
mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use autoroute_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use error::{ApiError, ApiResult};
pub use metrics::HttpMetrics;
pub use state::AppState;

/// Build state from `config` and serve until the process is stopped
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = web::Data::new(Arc::new(AppState::new(config).await?));

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(metrics::track_requests))
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
