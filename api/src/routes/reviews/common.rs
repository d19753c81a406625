use crate::response::{ApiResponse, Empty};
use crate::routes::common::{
    FieldErrors, conflict, db_failure, field_error, field_errors, not_found,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::is_unique_violation;
use db::models::course::Model as Course;
use db::models::review::{Model as Review, ReviewChanges};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

const DUPLICATE_REVIEW: &str = "A review with this email already exists for this course";
const COURSE_REQUIRED: &str = "This field is required";
const COURSE_MISSING: &str = "Invalid course id - object does not exist";

/// Reads a course primary key from a body field. Integers and numeric strings
/// are accepted.
fn course_pk(value: &Value) -> Result<i64, String> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        let received = match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "float",
            Value::String(_) => "str",
            Value::Array(_) => "list",
            Value::Object(_) => "dict",
        };
        format!("Incorrect type. Expected pk value, received {received}.")
    })
}

fn push_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_owned())
        .or_default()
        .push(message.into());
}

/// Full review body, used by create and `PUT`.
///
/// `course` stays untyped until a top-level handler reads it; nested routes
/// take the course from the path and never look at it.
#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    #[serde(default)]
    pub course: Option<Value>,

    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 255, message = "Name must be between 1 and 255 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: Option<String>,

    pub comment: Option<String>,

    #[validate(
        required(message = "Rating is required"),
        range(min = 1, max = 5, message = "Rating must be an integer between 1 and 5")
    )]
    pub rating: Option<i32>,
}

/// A review body that passed validation.
#[derive(Debug)]
pub struct ValidReview {
    pub course: Option<i64>,
    pub name: String,
    pub email: String,
    pub comment: String,
    pub rating: i32,
}

impl ReviewRequest {
    /// Validates the body. With `course_required` the `course` field is read
    /// and its errors are reported alongside the others; without it the field
    /// is ignored.
    pub fn into_valid(self, course_required: bool) -> Result<ValidReview, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => field_errors(&e),
        };

        let course = if course_required {
            match self.course.as_ref().map(course_pk) {
                Some(Ok(id)) => Some(id),
                Some(Err(message)) => {
                    push_error(&mut errors, "course", message);
                    None
                }
                None => {
                    push_error(&mut errors, "course", COURSE_REQUIRED);
                    None
                }
            }
        } else {
            None
        };

        match (self.name, self.email, self.rating) {
            (Some(name), Some(email), Some(rating)) if errors.is_empty() => Ok(ValidReview {
                course,
                name,
                email,
                comment: self.comment.unwrap_or_default(),
                rating,
            }),
            _ => Err(errors),
        }
    }
}

impl ValidReview {
    /// Replaces every writable field. `course_id` is only set when the caller
    /// may move the review.
    pub fn into_changes(self, course_id: Option<i64>) -> ReviewChanges {
        ReviewChanges {
            course_id,
            name: Some(self.name),
            email: Some(self.email),
            comment: Some(self.comment),
            rating: Some(self.rating),
        }
    }
}

/// Partial review body, used by `PATCH`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReviewPatch {
    #[serde(default)]
    pub course: Option<Value>,

    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,

    pub comment: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be an integer between 1 and 5"))]
    pub rating: Option<i32>,
}

impl ReviewPatch {
    /// Validates the provided fields. With `read_course` a present `course` is
    /// parsed and returned; otherwise it is ignored.
    pub fn check(&self, read_course: bool) -> Result<Option<i64>, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => field_errors(&e),
        };

        let course = match self.course.as_ref().filter(|_| read_course).map(course_pk) {
            Some(Ok(id)) => Some(id),
            Some(Err(message)) => {
                push_error(&mut errors, "course", message);
                None
            }
            None => None,
        };

        if errors.is_empty() {
            Ok(course)
        } else {
            Err(errors)
        }
    }

    pub fn into_changes(self, course_id: Option<i64>) -> ReviewChanges {
        ReviewChanges {
            course_id,
            name: self.name,
            email: self.email,
            comment: self.comment,
            rating: self.rating,
        }
    }
}

/// Public representation of a review. The reviewer's e-mail is write-only.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub course: i64,
    pub name: String,
    pub comment: String,
    pub rating: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            course: review.course_id,
            name: review.name,
            comment: review.comment,
            rating: review.rating,
            created_at: review.created_at.to_rfc3339(),
            updated_at: review.updated_at.to_rfc3339(),
        }
    }
}

/// Checks that `course_id`, taken from a request body, names an existing course.
pub async fn ensure_course_field(db: &DatabaseConnection, course_id: i64) -> Result<(), Response> {
    match Course::find_by_id(db, course_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(field_error("course", COURSE_MISSING)),
        Err(e) => Err(db_failure("Failed to load course", e)),
    }
}

/// Loads a review, `404` when it does not exist.
pub async fn find_review(db: &DatabaseConnection, review_id: i64) -> Result<Review, Response> {
    match Review::find_by_id(db, review_id).await {
        Ok(Some(review)) => Ok(review),
        Ok(None) => Err(not_found("Review not found")),
        Err(e) => Err(db_failure("Failed to load review", e)),
    }
}

/// Loads a review of one course, `404` when it does not exist or belongs to
/// another course.
pub async fn find_course_review(
    db: &DatabaseConnection,
    course_id: i64,
    review_id: i64,
) -> Result<Review, Response> {
    match Review::find_in_course(db, course_id, review_id).await {
        Ok(Some(review)) => Ok(review),
        Ok(None) => Err(not_found("Review not found")),
        Err(e) => Err(db_failure("Failed to load review", e)),
    }
}

pub async fn insert_review(db: &DatabaseConnection, course_id: i64, review: ValidReview) -> Response {
    match Review::create(
        db,
        course_id,
        &review.name,
        &review.email,
        &review.comment,
        review.rating,
    )
    .await
    {
        Ok(review) => {
            tracing::info!(review_id = review.id, course_id, "Created review");
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    ReviewResponse::from(review),
                    "Review created successfully",
                )),
            )
                .into_response()
        }
        Err(e) if is_unique_violation(&e) => conflict(DUPLICATE_REVIEW),
        Err(e) => db_failure("Failed to create review", e),
    }
}

pub async fn apply_changes(db: &DatabaseConnection, review_id: i64, changes: ReviewChanges) -> Response {
    match Review::update(db, review_id, changes).await {
        Ok(review) => Json(ApiResponse::success(
            ReviewResponse::from(review),
            "Review updated successfully",
        ))
        .into_response(),
        Err(e) if is_unique_violation(&e) => conflict(DUPLICATE_REVIEW),
        Err(e) => db_failure("Failed to update review", e),
    }
}

pub async fn remove_review(db: &DatabaseConnection, review_id: i64) -> Response {
    match Review::delete(db, review_id).await {
        Ok(true) => {
            tracing::info!(review_id, "Deleted review");
            Json(ApiResponse::success(Empty, "Review deleted successfully")).into_response()
        }
        Ok(false) => not_found("Review not found"),
        Err(e) => db_failure("Failed to delete review", e),
    }
}
