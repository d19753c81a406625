use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};
use serde::{Deserialize, Serialize};

/// A course that can be reviewed, stored in the `courses` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    /// Unique link to the course page.
    #[sea_orm(unique)]
    pub url: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(db: &DbConn, title: &str, url: &str) -> Result<Model, DbErr> {
        let now = Utc::now();
        let course = ActiveModel {
            title: Set(title.to_owned()),
            url: Set(url.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        course.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// All courses in creation order.
    pub fn ordered() -> Select<Entity> {
        Entity::find().order_by_asc(Column::Id)
    }

    /// Applies the provided fields; `None` keeps the stored value.
    pub async fn update(
        db: &DbConn,
        id: i64,
        title: Option<&str>,
        url: Option<&str>,
    ) -> Result<Model, DbErr> {
        let mut course = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Some(title) = title {
            course.title = Set(title.to_owned());
        }
        if let Some(url) = url {
            course.url = Set(url.to_owned());
        }

        course.update(db).await
    }

    /// Deletes a course (and, through the foreign key, its reviews).
    ///
    /// Returns `false` when no course had the given id.
    pub async fn delete(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
