//! API module
//!
//! HTTP API endpoints and middleware.

pub mod extract;
pub mod middleware;
pub mod routes;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use routes::{create_router, AppState};

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let api_router = create_router().layer(axum::middleware::from_fn(
        middleware::logging_middleware,
    ));

    // ServiceBuilder runs top to bottom:
    // set request id -> propagate -> trace -> cors -> logging -> handler
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .nest("/api/v1", api_router)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
