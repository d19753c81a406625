use api::auth::generate_jwt;
use api::build_app;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use db::models::user::Model as User;
use db::models::user_permission::{Model as UserPermission, Permission};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use util::state::AppState;

/// App over a fresh in-memory database, paginated 10 per page.
pub async fn make_test_app() -> (Router, AppState) {
    make_test_app_with_page_size(Some(10)).await
}

/// App over a fresh in-memory database; `None` disables pagination.
pub async fn make_test_app_with_page_size(page_size: Option<u64>) -> (Router, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::with_page_size(db, page_size);
    (build_app(app_state.clone()), app_state)
}

/// Creates a user holding `permissions` and returns it with a bearer token.
pub async fn user_with_token(
    db: &DatabaseConnection,
    username: &str,
    is_superuser: bool,
    permissions: &[Permission],
) -> (User, String) {
    let user = User::create(db, username, "password123", is_superuser)
        .await
        .expect("Failed to create user");
    for permission in permissions {
        UserPermission::grant(db, user.id, *permission)
            .await
            .expect("Failed to grant permission");
    }
    let (token, _) = generate_jwt(user.id, user.is_superuser).expect("Failed to issue token");
    (user, token)
}

/// Sends one request and returns the status with the decoded JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
