//! # Reviews Routes Module
//!
//! Review endpoints in both mounting styles:
//! - nested under a course (`/v1/courses/{course_id}/reviews`), where the
//!   parent course comes from the path;
//! - top level (`/v2/reviews`), without a list operation.

use crate::routes::capabilities::{Capabilities, Capability, ResourceRoutes};
use axum::Router;
use delete::{delete_course_review, delete_review};
use get::{get_course_review, get_review, list_course_reviews};
use post::{create_course_review, create_review};
use put::{patch_course_review, patch_review, update_course_review, update_review};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Top-level reviews support every operation except listing.
pub const REVIEW_CAPABILITIES: Capabilities = Capabilities::of(&[
    Capability::Create,
    Capability::Retrieve,
    Capability::Update,
    Capability::Destroy,
]);

/// Reviews scoped to a course.
///
/// - `GET    /courses/{course_id}/reviews` → `list_course_reviews`
/// - `POST   /courses/{course_id}/reviews` → `create_course_review`
/// - `GET    /courses/{course_id}/reviews/{review_id}` → `get_course_review`
/// - `PUT    /courses/{course_id}/reviews/{review_id}` → `update_course_review`
/// - `PATCH  /courses/{course_id}/reviews/{review_id}` → `patch_course_review`
/// - `DELETE /courses/{course_id}/reviews/{review_id}` → `delete_course_review`
pub fn course_review_routes() -> Router<AppState> {
    ResourceRoutes::new(Capabilities::ALL)
        .list(list_course_reviews)
        .create(create_course_review)
        .retrieve(get_course_review)
        .update(update_course_review)
        .partial_update(patch_course_review)
        .destroy(delete_course_review)
        .into_router(
            "/courses/{course_id}/reviews",
            "/courses/{course_id}/reviews/{review_id}",
        )
}

/// Top-level reviews. `GET /reviews` answers `405 Method Not Allowed`.
///
/// - `POST   /reviews` → `create_review`
/// - `GET    /reviews/{review_id}` → `get_review`
/// - `PUT    /reviews/{review_id}` → `update_review`
/// - `PATCH  /reviews/{review_id}` → `patch_review`
/// - `DELETE /reviews/{review_id}` → `delete_review`
pub fn review_routes() -> Router<AppState> {
    ResourceRoutes::new(REVIEW_CAPABILITIES)
        .create(create_review)
        .retrieve(get_review)
        .update(update_review)
        .partial_update(patch_review)
        .destroy(delete_review)
        .into_router("/reviews", "/reviews/{review_id}")
}
