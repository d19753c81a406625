use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A model-level permission granted to one user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "user_permissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub codename: Permission,
    pub created_at: DateTime<Utc>,
}

/// Per-action permissions on the course model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Display, EnumString,
    Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[strum(serialize_all = "snake_case")]
pub enum Permission {
    /// Recorded and reported, not checked: course reads are open to every
    /// authenticated caller.
    #[sea_orm(string_value = "view_course")]
    ViewCourse,

    #[sea_orm(string_value = "add_course")]
    AddCourse,

    #[sea_orm(string_value = "change_course")]
    ChangeCourse,

    #[sea_orm(string_value = "delete_course")]
    DeleteCourse,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Grants a permission. Granting one the user already holds is a no-op.
    pub async fn grant(db: &DbConn, user_id: i64, codename: Permission) -> Result<(), DbErr> {
        let grant = ActiveModel {
            user_id: Set(user_id),
            codename: Set(codename),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Entity::insert(grant)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::Codename])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(db)
            .await?;
        Ok(())
    }

    /// Revokes a permission; returns `false` when it was not granted.
    pub async fn revoke(db: &DbConn, user_id: i64, codename: Permission) -> Result<bool, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Codename.eq(codename))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Every permission granted to the user, in a stable order.
    pub async fn for_user(db: &DbConn, user_id: i64) -> Result<Vec<Permission>, DbErr> {
        let mut perms: Vec<Permission> = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|row| row.codename)
            .collect();
        perms.sort_by_key(|p| p.to_string());
        Ok(perms)
    }
}
