use anyhow::Result;
use contracts::domain::a002_profile::photo::{PhotoStatus, ProfilePhoto};
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_profile_photo")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub profile_id: String,
    pub url: String,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub is_primary: bool,
    pub sort_order: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProfilePhoto {
    fn from(m: Model) -> Self {
        ProfilePhoto {
            status: PhotoStatus::from_str(&m.status).unwrap_or_default(),
            id: m.id,
            url: m.url,
            rejection_reason: m.rejection_reason,
            is_primary: m.is_primary,
            sort_order: m.sort_order,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_for_profile(profile_id: &str) -> Result<Vec<ProfilePhoto>> {
    Ok(Entity::find()
        .filter(Column::ProfileId.eq(profile_id))
        .order_by_desc(Column::IsPrimary)
        .order_by_asc(Column::SortOrder)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Фото ищется только внутри своей анкеты
pub async fn get(profile_id: &str, photo_id: &str) -> Result<Option<Model>> {
    Ok(Entity::find_by_id(photo_id.to_string())
        .filter(Column::ProfileId.eq(profile_id))
        .one(conn())
        .await?)
}

pub async fn set_status(
    model: Model,
    status: PhotoStatus,
    reason: Option<String>,
) -> Result<ProfilePhoto> {
    let mut active: ActiveModel = model.into();
    active.status = Set(status.as_str().to_string());
    active.rejection_reason = Set(reason);
    Ok(active.update(conn()).await?.into())
}

pub async fn delete(photo_id: &str) -> Result<bool> {
    let result = Entity::delete_by_id(photo_id.to_string())
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
