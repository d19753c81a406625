pub mod auth;
pub mod pagination;
pub mod response;
pub mod routes;

use crate::auth::middleware::log_request;
use axum::{Router, middleware::from_fn};
use tower_http::cors::CorsLayer;
use util::state::AppState;

/// Assembles the full application: every route group under `/api`, request
/// logging and CORS.
pub fn build_app(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::routes(app_state))
        .layer(from_fn(log_request))
        .layer(CorsLayer::very_permissive())
}
