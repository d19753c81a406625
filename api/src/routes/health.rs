use crate::response::ApiResponse;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use util::state::AppState;

/// Public liveness route, mounted at `/api/health`.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    database: &'static str,
}

/// GET /health
///
/// Pings the review store. `503` when it cannot be reached.
///
/// ```json
/// {
///   "success": true,
///   "data": { "status": "OK", "database": "reachable" },
///   "message": "Health check passed"
/// }
/// ```
async fn health_check(State(app_state): State<AppState>) -> Response {
    match app_state.db().ping().await {
        Ok(()) => Json(ApiResponse::success(
            HealthReport {
                status: "OK",
                database: "reachable",
            },
            "Health check passed",
        ))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check could not reach the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error_with(
                    HealthReport {
                        status: "DEGRADED",
                        database: "unreachable",
                    },
                    "Database unreachable",
                )),
            )
                .into_response()
        }
    }
}
