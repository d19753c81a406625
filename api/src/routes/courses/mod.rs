//! # Courses Routes Module
//!
//! ## Structure
//! - `get.rs`: list, retrieve and the per-course reviews action
//! - `post.rs`: create
//! - `put.rs`: full and partial update
//! - `delete.rs`: delete
//! - `common.rs`: request bodies and the course representation

use crate::auth::guards::course_permissions;
use crate::routes::capabilities::{Capabilities, ResourceRoutes};
use axum::{Router, middleware::from_fn_with_state, routing::get};
use delete::delete_course;
use get::{get_course, get_course_reviews, list_courses};
use post::create_course;
use put::{patch_course, update_course};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

fn course_resource() -> ResourceRoutes<AppState> {
    ResourceRoutes::new(Capabilities::ALL)
        .list(list_courses)
        .create(create_course)
        .retrieve(get_course)
        .update(update_course)
        .partial_update(patch_course)
        .destroy(delete_course)
}

/// Plain course endpoints.
///
/// - `GET    /courses` → `list_courses`
/// - `POST   /courses` → `create_course`
/// - `GET    /courses/{course_id}` → `get_course`
/// - `PUT    /courses/{course_id}` → `update_course`
/// - `PATCH  /courses/{course_id}` → `patch_course`
/// - `DELETE /courses/{course_id}` → `delete_course`
pub fn course_routes() -> Router<AppState> {
    course_resource().into_router("/courses", "/courses/{course_id}")
}

/// Course endpoints guarded by the course permission chain, plus
/// `GET /courses/{course_id}/reviews` → `get_course_reviews`.
pub fn guarded_course_routes(app_state: AppState) -> Router<AppState> {
    course_resource()
        .into_router("/courses", "/courses/{course_id}")
        .route("/courses/{course_id}/reviews", get(get_course_reviews))
        .route_layer(from_fn_with_state(app_state, course_permissions))
}
