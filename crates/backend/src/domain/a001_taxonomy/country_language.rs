use anyhow::Result;
use contracts::domain::a001_taxonomy::node::CountryLanguage;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use super::repository as node_repository;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_country_language")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub country_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub language_id: String,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_links(country_id: &str) -> Result<Vec<Model>> {
    Ok(Entity::find()
        .filter(Column::CountryId.eq(country_id))
        .order_by_asc(Column::SortOrder)
        .all(conn())
        .await?)
}

/// Языки страны с подписями из справочника языков
pub async fn list_for_country(country_id: &str) -> Result<Vec<CountryLanguage>> {
    let links = list_links(country_id).await?;
    let mut out = Vec::with_capacity(links.len());
    for link in links {
        // связь на удалённый язык пропускаем
        let Some(language) = node_repository::get_by_id(&link.language_id).await? else {
            continue;
        };
        out.push(CountryLanguage {
            country_id: link.country_id,
            language_id: link.language_id,
            label: language.label,
            slug: language.slug,
            sort_order: link.sort_order,
        });
    }
    Ok(out)
}

pub async fn get(country_id: &str, language_id: &str) -> Result<Option<Model>> {
    Ok(Entity::find_by_id((country_id.to_string(), language_id.to_string()))
        .one(conn())
        .await?)
}

/// Новый язык встаёт в конец списка страны
pub async fn insert(country_id: &str, language_id: &str) -> Result<Model> {
    let next = list_links(country_id)
        .await?
        .iter()
        .map(|l| l.sort_order + 1)
        .max()
        .unwrap_or(0);
    let active = ActiveModel {
        country_id: Set(country_id.to_string()),
        language_id: Set(language_id.to_string()),
        sort_order: Set(next),
    };
    Ok(active.insert(conn()).await?)
}

pub async fn delete(country_id: &str, language_id: &str) -> Result<bool> {
    let result = Entity::delete_by_id((country_id.to_string(), language_id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn apply_order(
    txn: &DatabaseTransaction,
    country_id: &str,
    ordered_language_ids: &[String],
) -> Result<()> {
    for (index, language_id) in ordered_language_ids.iter().enumerate() {
        Entity::update_many()
            .col_expr(Column::SortOrder, Expr::value(index as i32))
            .filter(Column::CountryId.eq(country_id))
            .filter(Column::LanguageId.eq(language_id.as_str()))
            .exec(txn)
            .await?;
    }
    Ok(())
}
