//! HTTP API application wiring (Axum router + shared services).
//!
//! - `services.rs`: shared state handed to every handler
//! - `routes/`: HTTP routes + handlers (one file per entity)
//! - `dto.rs`: request DTOs and their validation
//! - `response.rs`: success payloads and how they are written
//! - `errors.rs`: error-to-status mapping

use std::sync::Arc;
use std::time::Duration;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod response;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
///
/// The request deadline sits innermost so its 504 is still logged and carries
/// the CORS header.
pub fn build_app(services: Arc<AppServices>, request_timeout: Duration) -> Router {
    routes::router().layer(Extension(services)).layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::request_log_middleware))
            .layer(axum::middleware::from_fn(middleware::cors_middleware))
            .layer(axum::middleware::from_fn_with_state(
                request_timeout,
                middleware::request_timeout_middleware,
            )),
    )
}
