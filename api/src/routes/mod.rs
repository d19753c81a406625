//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/auth` → register, login, current identity
//! - `/users` → permission administration (superuser only)
//! - `/v1` → plain course and nested review endpoints (authenticated)
//! - `/v2` → courses behind the course permission chain, top-level reviews
//!   (authenticated)

use crate::auth::guards::{allow_authenticated, allow_superuser};
use crate::routes::{
    auth::auth_routes,
    courses::{course_routes, guarded_course_routes},
    health::health_routes,
    reviews::{course_review_routes, review_routes},
    users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod auth;
pub mod capabilities;
pub mod common;
pub mod courses;
pub mod health;
pub mod reviews;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// # Route Structure:
/// - `/health` → Health check endpoint (no authentication required).
/// - `/auth` → Authentication endpoints.
/// - `/users` → Permission administration (restricted to superusers).
/// - `/v1/courses`, `/v1/courses/{course_id}/reviews` → every operation,
///   scoped reviews; any authenticated user.
/// - `/v2/courses` → guarded by `course_permissions`; `/v2/reviews` has no
///   list operation.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/users", users_routes().route_layer(from_fn(allow_superuser)))
        .nest("/v1", v1_routes())
        .nest("/v2", v2_routes(app_state.clone()))
        .with_state(app_state)
}

fn v1_routes() -> Router<AppState> {
    course_routes()
        .merge(course_review_routes())
        .route_layer(from_fn(allow_authenticated))
}

fn v2_routes(app_state: AppState) -> Router<AppState> {
    guarded_course_routes(app_state)
        .merge(review_routes().route_layer(from_fn(allow_authenticated)))
}
