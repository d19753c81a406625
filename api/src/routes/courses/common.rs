use db::models::course::Model as Course;
use db::models::review::{Entity as ReviewEntity, Model as Review, average_rating};
use sea_orm::{DatabaseConnection, DbErr, LoaderTrait};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DUPLICATE_URL: &str = "A course with this url already exists";

/// Full course body, used by create and `PUT`.
#[derive(Debug, Deserialize, Validate)]
pub struct CourseRequest {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, max = 255, message = "Title must be between 1 and 255 characters")
    )]
    pub title: Option<String>,

    #[validate(required(message = "URL is required"), url(message = "Enter a valid URL"))]
    pub url: Option<String>,
}

/// Partial course body, used by `PATCH`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CoursePatch {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,

    #[validate(url(message = "Enter a valid URL"))]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
    pub reviews: Vec<i64>,
    pub average_rating: Option<f64>,
}

impl CourseResponse {
    pub fn new(course: Course, reviews: &[Review]) -> Self {
        Self {
            id: course.id,
            title: course.title,
            url: course.url,
            created_at: course.created_at.to_rfc3339(),
            updated_at: course.updated_at.to_rfc3339(),
            reviews: reviews.iter().map(|r| r.id).collect(),
            average_rating: average_rating(reviews),
        }
    }

    /// Builds the representation of one course, loading its reviews.
    pub async fn load(db: &DatabaseConnection, course: Course) -> Result<Self, DbErr> {
        let reviews = Review::for_course(course.id).all(db).await?;
        Ok(Self::new(course, &reviews))
    }

    /// Builds the representations of many courses with a single review query.
    pub async fn load_all(db: &DatabaseConnection, courses: Vec<Course>) -> Result<Vec<Self>, DbErr> {
        let grouped = courses.load_many(ReviewEntity, db).await?;

        Ok(courses
            .into_iter()
            .zip(grouped)
            .map(|(course, mut reviews)| {
                reviews.sort_by_key(|r| r.id);
                Self::new(course, &reviews)
            })
            .collect())
    }
}
