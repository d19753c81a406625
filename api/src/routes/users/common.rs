use crate::routes::common::{db_failure, field_error, not_found};
use axum::response::Response;
use db::models::user::Model as User;
use db::models::user_permission::{Model as UserPermission, Permission};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Serialize)]
pub struct PermissionsResponse {
    pub user_id: i64,
    pub permissions: Vec<Permission>,
}

impl PermissionsResponse {
    pub async fn load(db: &DatabaseConnection, user_id: i64) -> Result<Self, Response> {
        let permissions = UserPermission::for_user(db, user_id)
            .await
            .map_err(|e| db_failure("Failed to load permissions", e))?;
        Ok(Self {
            user_id,
            permissions,
        })
    }
}

/// Parses a permission codename such as `change_course`.
pub fn parse_codename(raw: &str) -> Result<Permission, Response> {
    Permission::from_str(raw.trim())
        .map_err(|_| field_error("codename", &format!("Unknown permission codename '{raw}'")))
}

pub async fn ensure_user_exists(db: &DatabaseConnection, user_id: i64) -> Result<User, Response> {
    match User::find_by_id(db, user_id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(not_found("User not found")),
        Err(e) => Err(db_failure("Failed to load user", e)),
    }
}
