#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send, user_with_token};
    use axum::http::StatusCode;
    use db::models::course::Model as Course;
    use db::models::review::Model as Review;
    use serde_json::{Value, json};

    fn review_body(email: &str, rating: i64) -> Value {
        json!({
            "name": "Ann",
            "email": email,
            "comment": "Well paced",
            "rating": rating
        })
    }

    // --- /api/v1/courses/{course_id}/reviews ---

    #[tokio::test]
    async fn nested_create_uses_the_course_from_the_path() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let target = Course::create(db, "Target", "https://example.com/a").await.unwrap();
        let other = Course::create(db, "Other", "https://example.com/b").await.unwrap();

        let mut body = review_body("ann@example.com", 4);
        body["course"] = json!(other.id);
        let (status, json) = send(
            &app,
            "POST",
            &format!("/api/v1/courses/{}/reviews", target.id),
            Some(&token),
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["course"], target.id);
        assert_eq!(json["data"]["rating"], 4);
        assert!(json["data"].get("email").is_none());
    }

    #[tokio::test]
    async fn nested_create_ignores_course_of_any_shape() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let target = Course::create(db, "Target", "https://example.com/a").await.unwrap();
        let other = Course::create(db, "Other", "https://example.com/b").await.unwrap();
        let uri = format!("/api/v1/courses/{}/reviews", target.id);

        let shapes = [
            json!(other.id.to_string()),
            json!(format!("http://testserver/api/v1/courses/{}/", other.id)),
            json!({ "id": other.id }),
            Value::Null,
        ];
        for (i, course) in shapes.into_iter().enumerate() {
            let mut body = review_body(&format!("ann{i}@example.com"), 4);
            body["course"] = course.clone();
            let (status, json) = send(&app, "POST", &uri, Some(&token), Some(body)).await;

            assert_eq!(status, StatusCode::CREATED, "{course}");
            assert_eq!(json["data"]["course"], target.id, "{course}");
        }
    }

    #[tokio::test]
    async fn nested_create_validates_before_looking_up_the_course() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = user_with_token(app_state.db(), "user", false, &[]).await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/v1/courses/42/reviews",
            Some(&token),
            Some(review_body("ann@example.com", 9)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["data"]["rating"].is_array());
    }

    #[tokio::test]
    async fn nested_create_for_missing_course_is_not_found() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = user_with_token(app_state.db(), "user", false, &[]).await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/v1/courses/42/reviews",
            Some(&token),
            Some(review_body("ann@example.com", 4)),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course not found");
    }

    #[tokio::test]
    async fn nested_create_validates_fields() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let course = Course::create(db, "Rust", "https://example.com/rust").await.unwrap();
        let uri = format!("/api/v1/courses/{}/reviews", course.id);

        let (status, json) = send(&app, "POST", &uri, Some(&token), Some(review_body("nope", 6))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["data"]["rating"],
            json!(["Rating must be an integer between 1 and 5"])
        );
        assert_eq!(json["data"]["email"], json!(["Enter a valid email address"]));
    }

    #[tokio::test]
    async fn one_review_per_email_and_course() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let course = Course::create(db, "Rust", "https://example.com/rust").await.unwrap();
        let uri = format!("/api/v1/courses/{}/reviews", course.id);

        let (status, _) = send(&app, "POST", &uri, Some(&token), Some(review_body("ann@example.com", 4))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) = send(&app, "POST", &uri, Some(&token), Some(review_body("ann@example.com", 2))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            json["message"],
            "A review with this email already exists for this course"
        );
    }

    #[tokio::test]
    async fn nested_list_is_filtered_by_course() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let a = Course::create(db, "A", "https://example.com/a").await.unwrap();
        let b = Course::create(db, "B", "https://example.com/b").await.unwrap();
        Review::create(db, a.id, "Ann", "ann@example.com", "", 5).await.unwrap();
        Review::create(db, b.id, "Ben", "ben@example.com", "", 3).await.unwrap();
        Review::create(db, a.id, "Cat", "cat@example.com", "", 4).await.unwrap();

        let (status, json) = send(
            &app,
            "GET",
            &format!("/api/v1/courses/{}/reviews", a.id),
            Some(&token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let results = json["data"]["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r["course"] == a.id));
        assert_eq!(results[0]["name"], "Ann");
        assert_eq!(results[1]["name"], "Cat");
    }

    #[tokio::test]
    async fn review_of_another_course_is_not_found() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let a = Course::create(db, "A", "https://example.com/a").await.unwrap();
        let b = Course::create(db, "B", "https://example.com/b").await.unwrap();
        let review = Review::create(db, a.id, "Ann", "ann@example.com", "", 5).await.unwrap();
        let wrong = format!("/api/v1/courses/{}/reviews/{}", b.id, review.id);

        for method in ["GET", "DELETE"] {
            let (status, _) = send(&app, method, &wrong, Some(&token), None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        }
        let (status, _) = send(&app, "PATCH", &wrong, Some(&token), Some(json!({ "rating": 1 }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        assert!(Review::find_by_id(db, review.id).await.unwrap().is_some());

        let (status, json) = send(
            &app,
            "GET",
            &format!("/api/v1/courses/{}/reviews/{}", a.id, review.id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "Ann");
    }

    #[tokio::test]
    async fn nested_updates_never_move_the_review() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let a = Course::create(db, "A", "https://example.com/a").await.unwrap();
        let b = Course::create(db, "B", "https://example.com/b").await.unwrap();
        let review = Review::create(db, a.id, "Ann", "ann@example.com", "old", 5).await.unwrap();
        let uri = format!("/api/v1/courses/{}/reviews/{}", a.id, review.id);

        let mut body = review_body("ann@example.com", 2);
        body["course"] = json!(b.id);
        let (status, json) = send(&app, "PUT", &uri, Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["course"], a.id);
        assert_eq!(json["data"]["rating"], 2);
        assert_eq!(json["data"]["comment"], "Well paced");

        let (status, json) = send(
            &app,
            "PATCH",
            &uri,
            Some(&token),
            Some(json!({ "course": b.id, "comment": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["course"], a.id);
        assert_eq!(json["data"]["comment"], "");
        assert_eq!(json["data"]["rating"], 2);

        let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(Review::find_by_id(db, review.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn nested_updates_ignore_course_of_any_shape() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let a = Course::create(db, "A", "https://example.com/a").await.unwrap();
        let b = Course::create(db, "B", "https://example.com/b").await.unwrap();
        let review = Review::create(db, a.id, "Ann", "ann@example.com", "", 5).await.unwrap();
        let uri = format!("/api/v1/courses/{}/reviews/{}", a.id, review.id);

        let mut body = review_body("ann@example.com", 3);
        body["course"] = json!(b.id.to_string());
        let (status, json) = send(&app, "PUT", &uri, Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["course"], a.id);

        let (status, json) = send(
            &app,
            "PATCH",
            &uri,
            Some(&token),
            Some(json!({ "course": { "id": b.id }, "rating": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["course"], a.id);
        assert_eq!(json["data"]["rating"], 1);
    }

    // --- /api/v2/reviews ---

    #[tokio::test]
    async fn top_level_list_is_not_allowed() {
        let (app, app_state) = make_test_app().await;
        let (_, token) = user_with_token(app_state.db(), "user", false, &[]).await;

        let (status, _) = send(&app, "GET", "/api/v2/reviews", Some(&token), None).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn top_level_create_requires_an_existing_course() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let course = Course::create(db, "Rust", "https://example.com/rust").await.unwrap();

        let (status, json) = send(
            &app,
            "POST",
            "/api/v2/reviews",
            Some(&token),
            Some(review_body("ann@example.com", 5)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["data"]["course"], json!(["This field is required"]));

        let mut body = review_body("ann@example.com", 5);
        body["course"] = json!(999);
        let (status, json) = send(&app, "POST", "/api/v2/reviews", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["data"]["course"].is_array());

        let mut body = review_body("ann@example.com", 5);
        body["course"] = json!(course.id);
        let (status, json) = send(&app, "POST", "/api/v2/reviews", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["course"], course.id);
    }

    #[tokio::test]
    async fn top_level_course_accepts_a_numeric_string_only() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let course = Course::create(db, "Rust", "https://example.com/rust").await.unwrap();

        let mut body = review_body("ann@example.com", 5);
        body["course"] = json!({ "id": course.id });
        let (status, json) = send(&app, "POST", "/api/v2/reviews", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["data"]["course"],
            json!(["Incorrect type. Expected pk value, received dict."])
        );

        let mut body = review_body("ann@example.com", 5);
        body["course"] = json!(course.id.to_string());
        let (status, json) = send(&app, "POST", "/api/v2/reviews", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["course"], course.id);

        let uri = format!("/api/v2/reviews/{}", json["data"]["id"]);
        let (status, json) = send(&app, "PATCH", &uri, Some(&token), Some(json!({ "course": "999" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["data"]["course"],
            json!(["Invalid course id - object does not exist"])
        );
    }

    #[tokio::test]
    async fn top_level_retrieve_update_destroy() {
        let (app, app_state) = make_test_app().await;
        let db = app_state.db();
        let (_, token) = user_with_token(db, "user", false, &[]).await;
        let a = Course::create(db, "A", "https://example.com/a").await.unwrap();
        let b = Course::create(db, "B", "https://example.com/b").await.unwrap();
        let review = Review::create(db, a.id, "Ann", "ann@example.com", "", 5).await.unwrap();
        let uri = format!("/api/v2/reviews/{}", review.id);

        let (status, json) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], review.id);

        let (status, json) = send(&app, "PATCH", &uri, Some(&token), Some(json!({ "rating": 3 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["rating"], 3);

        let mut body = review_body("ann@example.com", 1);
        body["course"] = json!(b.id);
        let (status, json) = send(&app, "PUT", &uri, Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["course"], b.id);

        let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn top_level_requires_authentication() {
        let (app, _) = make_test_app().await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/v2/reviews",
            None,
            Some(review_body("ann@example.com", 5)),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
