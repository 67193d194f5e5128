use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use contracts::domain::a001_taxonomy::kind::RecordKind;
use contracts::domain::a001_taxonomy::node::{OriginSettings, OriginTerminology, TaxonomyNode};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    Set, Statement,
};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_taxonomy_node")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub parent_id: Option<String>,
    pub slug: String,
    pub label: String,
    pub native_label: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub is_popular: bool,
    pub is_protected: bool,
    pub emoji: Option<String>,
    pub level1_label: Option<String>,
    pub level1_label_plural: Option<String>,
    pub level2_label: Option<String>,
    pub level2_label_plural: Option<String>,
    pub level2_enabled: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Колонки анкеты, ссылающиеся на записи справочника
pub const PROFILE_REF_COLUMNS: &[&str] = &[
    "origin_id",
    "ethnicity_id",
    "caste_id",
    "mother_tongue_id",
    "country_id",
    "state_id",
    "city_id",
    "sect_id",
    "maslak_id",
    "education_level_id",
    "education_field_id",
];

impl Model {
    pub fn record_kind(&self) -> Result<RecordKind> {
        RecordKind::from_key(&self.kind)
            .ok_or_else(|| anyhow::anyhow!("Unknown taxonomy kind '{}' in record {}", self.kind, self.id))
    }

    pub fn origin_settings(&self) -> Option<OriginSettings> {
        if self.kind != RecordKind::Origin.key() {
            return None;
        }
        let defaults = OriginTerminology::default();
        Some(OriginSettings {
            emoji: self.emoji.clone(),
            terminology: OriginTerminology {
                level1_label: self.level1_label.clone().unwrap_or(defaults.level1_label),
                level1_label_plural: self
                    .level1_label_plural
                    .clone()
                    .unwrap_or(defaults.level1_label_plural),
                level2_label: self.level2_label.clone().unwrap_or(defaults.level2_label),
                level2_label_plural: self
                    .level2_label_plural
                    .clone()
                    .unwrap_or(defaults.level2_label_plural),
                level2_enabled: self.level2_enabled,
            },
        })
    }

    pub fn into_node(self, counts: NodeCounts) -> Result<TaxonomyNode> {
        let kind = self.record_kind()?;
        let origin = self.origin_settings();
        Ok(TaxonomyNode {
            id: self.id,
            kind,
            parent_id: self.parent_id,
            slug: self.slug,
            label: self.label,
            native_label: self.native_label,
            sort_order: self.sort_order,
            is_active: self.is_active,
            is_popular: self.is_popular,
            is_protected: self.is_protected,
            child_count: counts.children,
            profile_count: counts.profiles,
            origin,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeCounts {
    pub children: i64,
    pub profiles: i64,
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Записи одного уровня внутри родителя, в порядке отображения
pub async fn list_scope(kind: RecordKind, parent_id: Option<&str>) -> Result<Vec<Model>> {
    let mut query = Entity::find().filter(Column::Kind.eq(kind.key()));
    query = match parent_id {
        Some(p) => query.filter(Column::ParentId.eq(p)),
        None => query.filter(Column::ParentId.is_null()),
    };
    Ok(query
        .order_by_asc(Column::SortOrder)
        .order_by_asc(Column::Label)
        .all(conn())
        .await?)
}

pub async fn list_active(kind: RecordKind, parent_id: Option<&str>) -> Result<Vec<Model>> {
    Ok(list_scope(kind, parent_id)
        .await?
        .into_iter()
        .filter(|m| m.is_active)
        .collect())
}

/// Число дочерних записей и анкет на каждую запись области одним запросом
pub async fn scope_counts(
    kind: RecordKind,
    parent_id: Option<&str>,
) -> Result<HashMap<String, NodeCounts>> {
    let sql = format!(
        "SELECT n.id AS id,
            (SELECT COUNT(*) FROM a001_taxonomy_node c WHERE c.parent_id = n.id) AS child_count,
            (SELECT COUNT(*) FROM a002_profile p WHERE n.id IN ({})) AS profile_count
         FROM a001_taxonomy_node n
         WHERE n.kind = ? AND n.parent_id IS ?",
        PROFILE_REF_COLUMNS
            .iter()
            .map(|c| format!("p.{}", c))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let rows = conn()
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &sql,
            [kind.key().into(), parent_id.map(str::to_string).into()],
        ))
        .await?;

    let mut out = HashMap::with_capacity(rows.len());
    for row in rows {
        let id: String = row.try_get("", "id")?;
        out.insert(
            id,
            NodeCounts {
                children: row.try_get("", "child_count")?,
                profiles: row.try_get("", "profile_count")?,
            },
        );
    }
    Ok(out)
}

pub async fn get_by_id(id: &str) -> Result<Option<Model>> {
    Ok(Entity::find_by_id(id.to_string()).one(conn()).await?)
}

pub async fn find_by_slug(
    kind: RecordKind,
    parent_id: Option<&str>,
    slug: &str,
) -> Result<Option<Model>> {
    let mut query = Entity::find()
        .filter(Column::Kind.eq(kind.key()))
        .filter(Column::Slug.eq(slug));
    query = match parent_id {
        Some(p) => query.filter(Column::ParentId.eq(p)),
        None => query.filter(Column::ParentId.is_null()),
    };
    Ok(query.one(conn()).await?)
}

pub async fn count_all() -> Result<u64> {
    use sea_orm::PaginatorTrait;
    Ok(Entity::find().count(conn()).await?)
}

pub async fn insert(model: Model) -> Result<Model> {
    let active: ActiveModel = model.into();
    Ok(active.insert(conn()).await?)
}

pub async fn update(model: Model) -> Result<Model> {
    let mut active: ActiveModel = model.clone().into();
    active.slug = Set(model.slug);
    active.label = Set(model.label);
    active.native_label = Set(model.native_label);
    active.sort_order = Set(model.sort_order);
    active.is_active = Set(model.is_active);
    active.is_popular = Set(model.is_popular);
    active.emoji = Set(model.emoji);
    active.level1_label = Set(model.level1_label);
    active.level1_label_plural = Set(model.level1_label_plural);
    active.level2_label = Set(model.level2_label);
    active.level2_label_plural = Set(model.level2_label_plural);
    active.level2_enabled = Set(model.level2_enabled);
    active.updated_at = Set(Some(Utc::now()));
    active.version = Set(model.version + 1);
    Ok(active.update(conn()).await?)
}

/// Id всех потомков (в ширину), без самой записи
pub async fn descendant_ids(txn: &DatabaseTransaction, id: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    let mut frontier = vec![id.to_string()];
    while !frontier.is_empty() {
        let children: Vec<String> = Entity::find()
            .filter(Column::ParentId.is_in(frontier.clone()))
            .all(txn)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect();
        out.extend(children.iter().cloned());
        frontier = children;
    }
    Ok(out)
}

/// Удаление записей вместе со связями "язык страны" и ссылками из анкет
pub async fn delete_many(txn: &DatabaseTransaction, ids: &[String]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let values: Vec<Value> = ids.iter().map(|id| id.clone().into()).collect();

    for column in PROFILE_REF_COLUMNS {
        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!(
                "UPDATE a002_profile SET {col} = NULL WHERE {col} IN ({ph})",
                col = column,
                ph = placeholders
            ),
            values.clone(),
        ))
        .await?;
    }

    let mut link_values = values.clone();
    link_values.extend(values.iter().cloned());
    txn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        &format!(
            "DELETE FROM a001_country_language WHERE country_id IN ({ph}) OR language_id IN ({ph})",
            ph = placeholders
        ),
        link_values,
    ))
    .await?;

    let result = Entity::delete_many()
        .filter(Column::Id.is_in(ids.to_vec()))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

/// Запись sort_order = позиция в списке
pub async fn apply_order(txn: &DatabaseTransaction, kind: RecordKind, ordered_ids: &[String]) -> Result<()> {
    let now = Utc::now();
    for (index, id) in ordered_ids.iter().enumerate() {
        Entity::update_many()
            .col_expr(Column::SortOrder, Expr::value(index as i32))
            .col_expr(Column::UpdatedAt, Expr::value(Some(now)))
            .filter(Column::Id.eq(id.as_str()))
            .filter(Column::Kind.eq(kind.key()))
            .exec(txn)
            .await?;
    }
    Ok(())
}

pub async fn set_flags(id: &str, is_active: Option<bool>, is_popular: Option<bool>) -> Result<Option<Model>> {
    let Some(model) = get_by_id(id).await? else {
        return Ok(None);
    };
    let mut active: ActiveModel = model.clone().into();
    if let Some(v) = is_active {
        active.is_active = Set(v);
    }
    if let Some(v) = is_popular {
        active.is_popular = Set(v);
    }
    active.updated_at = Set(Some(Utc::now()));
    active.version = Set(model.version + 1);
    Ok(Some(active.update(conn()).await?))
}
