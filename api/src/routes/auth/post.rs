use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::common::{
    conflict, db_failure, error_response, field_errors, validation_failed,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::is_unique_violation;
use db::models::user::Model as User;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

lazy_static::lazy_static! {
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[\w.@+-]+$").unwrap();
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "Username is required"),
        length(min = 3, max = 150, message = "Username must be between 3 and 150 characters"),
        regex(
            path = *USERNAME_REGEX,
            message = "Username may only contain letters, digits and @/./+/-/_"
        )
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 8, message = "Password must be at least 8 characters")
    )]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub id: i64,
    pub username: String,
    pub is_superuser: bool,
    pub token: String,
    pub expires_at: String,
}

fn issue_token(user: User, status: StatusCode, message: &str) -> Response {
    match generate_jwt(user.id, user.is_superuser) {
        Ok((token, expires_at)) => {
            let body = TokenResponse {
                id: user.id,
                username: user.username,
                is_superuser: user.is_superuser,
                token,
                expires_at,
            };
            (status, Json(ApiResponse::success(body, message))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = user.id, "Failed to issue token");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue token")
        }
    }
}

/// POST /auth/register
///
/// Registers a regular (non-superuser) account and returns a token for it.
///
/// ### Request Body
/// ```json
/// { "username": "alice", "password": "correct horse" }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ id, username, is_superuser, token, expires_at }`
/// - `400 Bad Request` with per-field messages
/// - `409 Conflict` when the username is taken
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_failed(field_errors(&e));
    }
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return error_response(StatusCode::BAD_REQUEST, "Username and password are required");
    };

    let db = app_state.db();

    match User::find_by_username(db, &username).await {
        Ok(Some(_)) => return conflict("A user with this username already exists"),
        Ok(None) => {}
        Err(e) => return db_failure("Failed to look up username", e),
    }

    match User::create(db, &username, &password, false).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, username = %user.username, "Registered user");
            issue_token(user, StatusCode::CREATED, "User registered successfully")
        }
        Err(e) if is_unique_violation(&e) => conflict("A user with this username already exists"),
        Err(e) => db_failure("Failed to create user", e),
    }
}

/// POST /auth/login
///
/// ### Responses
/// - `200 OK` with `{ id, username, is_superuser, token, expires_at }`
/// - `401 Unauthorized` for an unknown user or a wrong password
pub async fn login(State(app_state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    match User::verify_credentials(app_state.db(), &req.username, &req.password).await {
        Ok(Some(user)) => issue_token(user, StatusCode::OK, "Login successful"),
        Ok(None) => error_response(StatusCode::UNAUTHORIZED, "Invalid username or password"),
        Err(e) => db_failure("Failed to verify credentials", e),
    }
}
