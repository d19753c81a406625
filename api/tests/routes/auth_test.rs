#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send, user_with_token};
    use axum::http::StatusCode;
    use db::models::user_permission::Permission;
    use serde_json::json;

    #[tokio::test]
    async fn register_returns_a_working_token() {
        let (app, _) = make_test_app().await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "username": "alice", "password": "correct-horse" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["username"], "alice");
        assert_eq!(json["data"]["is_superuser"], false);

        let token = json["data"]["token"].as_str().unwrap().to_owned();
        let (status, me) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["data"]["username"], "alice");
        assert_eq!(me["data"]["permissions"], json!([]));
    }

    #[tokio::test]
    async fn register_rejects_duplicates_and_weak_passwords() {
        let (app, _) = make_test_app().await;
        let body = json!({ "username": "bob", "password": "password123" });

        let (status, _) = send(&app, "POST", "/api/auth/register", None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) = send(&app, "POST", "/api/auth/register", None, Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);

        let (status, json) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "username": "carol", "password": "short" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["data"]["password"],
            json!(["Password must be at least 8 characters"])
        );
    }

    #[tokio::test]
    async fn login_checks_the_password() {
        let (app, app_state) = make_test_app().await;
        user_with_token(app_state.db(), "dave", false, &[]).await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "dave", "password": "password123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["token"].is_string());

        let (status, json) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "dave", "password": "wrong-password" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid username or password");
    }

    #[tokio::test]
    async fn me_requires_a_token_and_lists_permissions() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = user_with_token(
            app_state.db(),
            "editor",
            false,
            &[Permission::ChangeCourse, Permission::AddCourse],
        )
        .await;

        let (status, json) = send(&app, "GET", "/api/auth/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Authentication required");

        let (status, json) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["permissions"], json!(["add_course", "change_course"]));
    }
}
