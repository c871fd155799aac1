//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Blog routes are mounted under `/api/blog`; `/healthz` answers liveness
//! probes. Every request runs inside a `TraceLayer` span.

pub mod blog;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::AppState;

pub const BLOG_PREFIX: &str = "/api/blog";

/// Full application router.
pub fn app(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest(BLOG_PREFIX, blog::router())
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http());

    let router = if config.cors_permissive {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    };

    router.with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
