#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, make_test_app_with_page_size, send, user_with_token};
    use axum::http::StatusCode;
    use db::models::course::Model as Course;
    use db::models::review::Model as Review;
    use db::models::user_permission::Permission;
    use serde_json::json;

    // --- /api/v1/courses ---

    #[tokio::test]
    async fn v1_requires_authentication() {
        let (app, _) = make_test_app().await;

        let (status, json) = send(&app, "GET", "/api/v1/courses", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Authentication required");
    }

    #[tokio::test]
    async fn create_returns_the_full_representation() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = user_with_token(app_state.db(), "user", false, &[]).await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/v1/courses",
            Some(&token),
            Some(json!({ "title": "Python Collections", "url": "https://example.com/python" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let data = &json["data"];
        assert_eq!(data["title"], "Python Collections");
        assert_eq!(data["url"], "https://example.com/python");
        assert_eq!(data["reviews"], json!([]));
        assert!(data["average_rating"].is_null());
        assert!(data["id"].is_i64());
    }

    #[tokio::test]
    async fn create_reports_field_errors() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = user_with_token(app_state.db(), "user", false, &[]).await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/v1/courses",
            Some(&token),
            Some(json!({ "url": "not a url" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["title"], json!(["Title is required"]));
        assert_eq!(json["data"]["url"], json!(["Enter a valid URL"]));
        assert!(Course::find_by_id(app_state.db(), 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_url_conflicts() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = user_with_token(app_state.db(), "user", false, &[]).await;
        Course::create(app_state.db(), "Rust", "https://example.com/rust")
            .await
            .unwrap();

        let (status, json) = send(
            &app,
            "POST",
            "/api/v1/courses",
            Some(&token),
            Some(json!({ "title": "Rust again", "url": "https://example.com/rust" })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "A course with this url already exists");
    }

    #[tokio::test]
    async fn retrieve_includes_review_ids_and_average() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let course = Course::create(db, "Rust", "https://example.com/rust").await.unwrap();
        let r1 = Review::create(db, course.id, "Ann", "ann@example.com", "", 4).await.unwrap();
        let r2 = Review::create(db, course.id, "Ben", "ben@example.com", "Great", 5)
            .await
            .unwrap();

        let (status, json) = send(
            &app,
            "GET",
            &format!("/api/v1/courses/{}", course.id),
            Some(&token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["reviews"], json!([r1.id, r2.id]));
        assert_eq!(json["data"]["average_rating"], 4.5);

        let (status, json) = send(&app, "GET", "/api/v1/courses/999", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course not found");
    }

    #[tokio::test]
    async fn put_patch_and_delete() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let course = Course::create(db, "Rust", "https://example.com/rust").await.unwrap();
        let uri = format!("/api/v1/courses/{}", course.id);

        let (status, json) = send(
            &app,
            "PUT",
            &uri,
            Some(&token),
            Some(json!({ "title": "Rust 2024", "url": "https://example.com/rust-2024" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["title"], "Rust 2024");

        let (status, json) = send(&app, "PUT", &uri, Some(&token), Some(json!({ "title": "Only" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["data"]["url"], json!(["URL is required"]));

        let (status, json) = send(&app, "PATCH", &uri, Some(&token), Some(json!({ "title": "Async Rust" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["title"], "Async Rust");
        assert_eq!(json["data"]["url"], "https://example.com/rust-2024");

        let (status, json) = send(&app, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Course deleted successfully");

        let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "PATCH", &uri, Some(&token), Some(json!({ "title": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_is_paginated_in_creation_order() {
        let (app, app_state) = make_test_app_with_page_size(Some(2)).await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        for i in 1..=5 {
            Course::create(db, &format!("Course {i}"), &format!("https://example.com/{i}"))
                .await
                .unwrap();
        }

        let (status, json) = send(&app, "GET", "/api/v1/courses?page=2", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["page"], 2);
        assert_eq!(data["per_page"], 2);
        assert_eq!(data["total"], 5);
        assert_eq!(data["total_pages"], 3);
        assert_eq!(data["results"][0]["title"], "Course 3");
        assert_eq!(data["results"][1]["title"], "Course 4");

        let (_, json) = send(&app, "GET", "/api/v1/courses?page=last", Some(&token), None).await;
        assert_eq!(json["data"]["page"], 3);
        assert_eq!(json["data"]["results"].as_array().unwrap().len(), 1);

        for bad in ["4", "0", "abc"] {
            let (status, json) = send(
                &app,
                "GET",
                &format!("/api/v1/courses?page={bad}"),
                Some(&token),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::NOT_FOUND, "page={bad}");
            assert_eq!(json["message"], "Invalid page");
        }
    }

    #[tokio::test]
    async fn list_without_pagination_is_a_plain_array() {
        let (app, app_state) = make_test_app_with_page_size(None).await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        Course::create(db, "One", "https://example.com/1").await.unwrap();
        Course::create(db, "Two", "https://example.com/2").await.unwrap();

        let (status, json) = send(&app, "GET", "/api/v1/courses", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        let results = json["data"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["title"], "One");
    }

    // --- /api/v2/courses (permission chain) ---

    #[tokio::test]
    async fn v2_reads_need_an_identity_only() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = user_with_token(app_state.db(), "reader", false, &[]).await;

        let (status, _) = send(&app, "GET", "/api/v2/courses", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "GET", "/api/v2/courses", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn v2_writes_need_model_permissions() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, reader) = user_with_token(db, "reader", false, &[]).await;
        let (_, editor) = user_with_token(
            db,
            "editor",
            false,
            &[Permission::AddCourse, Permission::ChangeCourse],
        )
        .await;
        let body = json!({ "title": "Go", "url": "https://example.com/go" });

        let (status, json) = send(&app, "POST", "/api/v2/courses", Some(&reader), Some(body.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "You do not have permission to perform this action");

        let (status, json) = send(&app, "POST", "/api/v2/courses", Some(&editor), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let uri = format!("/api/v2/courses/{}", json["data"]["id"]);

        let (status, _) = send(&app, "PATCH", &uri, Some(&reader), Some(json!({ "title": "Golang" }))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = send(&app, "PATCH", &uri, Some(&editor), Some(json!({ "title": "Golang" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["title"], "Golang");
    }

    #[tokio::test]
    async fn v2_delete_is_reserved_for_superusers() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, deleter) = user_with_token(db, "deleter", false, &[Permission::DeleteCourse]).await;
        let (_, root) = user_with_token(db, "root", true, &[]).await;
        let course = Course::create(db, "Rust", "https://example.com/rust").await.unwrap();
        let uri = format!("/api/v2/courses/{}", course.id);

        let (status, _) = send(&app, "DELETE", &uri, None, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "DELETE", &uri, Some(&deleter), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(Course::find_by_id(db, course.id).await.unwrap().is_some());

        let (status, json) = send(&app, "DELETE", &uri, Some(&root), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Course deleted successfully");
        assert!(Course::find_by_id(db, course.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn v2_superuser_may_write_without_explicit_permissions() {
        let (app, app_state) = make_test_app().await;
        let (_, root) = user_with_token(app_state.db(), "root", true, &[]).await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/v2/courses",
            Some(&root),
            Some(json!({ "title": "C", "url": "https://example.com/c" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
    }
}
