use crate::auth::claims::AuthUser;
use crate::auth::permissions::{Caller, Denial, course_policies, evaluate};
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user_permission::{Model as UserPermission, Permission};
use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use util::state::AppState;

type GuardRejection = (StatusCode, Json<ApiResponse<Empty>>);

/// Helper to extract and validate the user, then insert them back into the request.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), GuardRejection> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Like `extract_and_insert_authuser`, but anonymous requests pass through.
async fn extract_optional_authuser(req: Request<Body>) -> (Request<Body>, Option<AuthUser>) {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &()).await.ok();

    let mut req = Request::from_parts(parts, body);
    if let Some(user) = &user {
        req.extensions_mut().insert(user.clone());
    }
    (req, user)
}

/// Loads the caller's model permissions. Superusers skip the lookup.
async fn load_caller(db: &DatabaseConnection, user: &AuthUser) -> Result<Caller, GuardRejection> {
    let user_id = user.user_id();
    let permissions: HashSet<Permission> = if user.is_superuser() {
        HashSet::new()
    } else {
        UserPermission::for_user(db, user_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id, "Failed to load permissions");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Failed to check permissions")),
                )
            })?
            .into_iter()
            .collect()
    };

    Ok(Caller {
        user_id,
        is_superuser: user.is_superuser(),
        permissions,
    })
}

fn denial_response(denial: Denial) -> GuardRejection {
    match denial {
        Denial::Unauthenticated => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Authentication required")),
        ),
        Denial::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "You do not have permission to perform this action",
            )),
        ),
    }
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Superuser-only guard.
pub async fn allow_superuser(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.is_superuser() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Superuser access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// Guard for the course resource: runs the course permission chain.
///
/// Anonymous requests are evaluated too, so the status reflects which policy
/// refused them (`401` for a missing identity, `403` otherwise).
pub async fn course_permissions(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardRejection> {
    let (req, user) = extract_optional_authuser(req).await;

    let caller = match &user {
        Some(user) => Some(load_caller(app_state.db(), user).await?),
        None => None,
    };

    evaluate(&course_policies(), req.method(), caller.as_ref()).map_err(denial_response)?;

    Ok(next.run(req).await)
}
