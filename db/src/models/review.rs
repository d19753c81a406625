use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};
use serde::{Deserialize, Serialize};

/// A single review of a course, stored in the `reviews` table.
///
/// `(email, course_id)` is unique: one review per reviewer per course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub course_id: i64,

    pub name: String,
    pub email: String,
    pub comment: String,
    pub rating: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Field changes for an existing review. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ReviewChanges {
    pub course_id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub comment: Option<String>,
    pub rating: Option<i32>,
}

impl Model {
    pub async fn create(
        db: &DbConn,
        course_id: i64,
        name: &str,
        email: &str,
        comment: &str,
        rating: i32,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let review = ActiveModel {
            course_id: Set(course_id),
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            comment: Set(comment.to_owned()),
            rating: Set(rating),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        review.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Looks a review up by its id *and* its parent course.
    ///
    /// A review that exists under a different course is reported as `None`.
    pub async fn find_in_course(
        db: &DbConn,
        course_id: i64,
        id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::CourseId.eq(course_id))
            .one(db)
            .await
    }

    /// Reviews of one course in creation order.
    pub fn for_course(course_id: i64) -> Select<Entity> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
    }

    pub async fn update(db: &DbConn, id: i64, changes: ReviewChanges) -> Result<Model, DbErr> {
        let mut review = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(course_id) = changes.course_id {
            review.course_id = Set(course_id);
        }
        if let Some(name) = changes.name {
            review.name = Set(name);
        }
        if let Some(email) = changes.email {
            review.email = Set(email);
        }
        if let Some(comment) = changes.comment {
            review.comment = Set(comment);
        }
        if let Some(rating) = changes.rating {
            review.rating = Set(rating);
        }

        review.update(db).await
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}

/// Mean rating of the given reviews, `None` when there are none.
pub fn average_rating(reviews: &[Model]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
    Some(sum as f64 / reviews.len() as f64)
}
