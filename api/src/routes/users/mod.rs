//! # Users Routes Module
//!
//! Routes for the `/api/users` endpoint group: administration of the
//! model-level permissions held by each user.
//!
//! ## Structure
//! - `get.rs`: list a user's permissions
//! - `post.rs`: grant a permission
//! - `delete.rs`: revoke a permission
//!
//! ## Middleware
//! The whole group is nested behind `allow_superuser`.

use axum::{
    Router,
    routing::{delete, get},
};
use delete::revoke_permission;
use get::list_permissions;
use post::grant_permission;
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

/// Builds the `/users` route group.
///
/// - `GET /users/{user_id}/permissions` → `list_permissions`
/// - `POST /users/{user_id}/permissions` → `grant_permission`
/// - `DELETE /users/{user_id}/permissions/{codename}` → `revoke_permission`
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{user_id}/permissions",
            get(list_permissions).post(grant_permission),
        )
        .route(
            "/{user_id}/permissions/{codename}",
            delete(revoke_permission),
        )
}
