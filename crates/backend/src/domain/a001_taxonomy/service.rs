use anyhow::Result;
use chrono::Utc;
use contracts::domain::a001_taxonomy::kind::{RecordKind, TaxonomyDomain};
use contracts::domain::a001_taxonomy::node::{
    CountryLanguage, NodePayload, OriginSettings, TaxonomyNode,
};
use contracts::domain::a001_taxonomy::reorder::{validate_permutation, ReorderRequest, ReorderType};
use contracts::domain::lookup::{LookupFlagUpdate, LookupItem};
use sea_orm::TransactionTrait;

use super::country_language;
use super::repository::{self, Model, NodeCounts};
use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

// ============================================================================
// Read
// ============================================================================

/// Для дочерних уровней родитель обязателен, для корневых игнорируется
fn scope_parent(kind: RecordKind, parent_id: Option<String>) -> Result<Option<String>> {
    let parent_id = parent_id.filter(|p| !p.trim().is_empty());
    match (kind.parent_kind(), parent_id) {
        (Some(parent), None) => Err(AppError::validation(format!(
            "parentId ({}) is required to list {}",
            parent.singular().to_lowercase(),
            kind.plural().to_lowercase()
        ))
        .into()),
        (Some(_), Some(p)) => Ok(Some(p)),
        (None, _) => Ok(None),
    }
}

pub async fn list(kind: RecordKind, parent_id: Option<String>) -> Result<Vec<TaxonomyNode>> {
    let parent_id = scope_parent(kind, parent_id)?;
    let models = repository::list_scope(kind, parent_id.as_deref()).await?;
    let counts = repository::scope_counts(kind, parent_id.as_deref()).await?;
    models
        .into_iter()
        .map(|m| {
            let c = counts.get(&m.id).copied().unwrap_or_default();
            m.into_node(c)
        })
        .collect()
}

async fn require(kind: RecordKind, id: &str) -> Result<Model> {
    let model = repository::get_by_id(id)
        .await?
        .filter(|m| m.kind == kind.key())
        .ok_or_else(|| AppError::not_found(format!("{} not found", kind.singular())))?;
    Ok(model)
}

async fn with_counts(model: Model) -> Result<TaxonomyNode> {
    let kind = model.record_kind()?;
    let counts = repository::scope_counts(kind, model.parent_id.as_deref()).await?;
    let c: NodeCounts = counts.get(&model.id).copied().unwrap_or_default();
    model.into_node(c)
}

// ============================================================================
// Write
// ============================================================================

async fn ensure_parent(kind: RecordKind, parent_id: Option<&str>) -> Result<()> {
    let (Some(parent_kind), Some(parent_id)) = (kind.parent_kind(), parent_id) else {
        return Ok(());
    };
    require(parent_kind, parent_id).await.map_err(|_| {
        AppError::validation(format!("{} {} does not exist", parent_kind.singular(), parent_id))
    })?;
    Ok(())
}

async fn ensure_unique_slug(
    kind: RecordKind,
    parent_id: Option<&str>,
    slug: &str,
    except_id: Option<&str>,
) -> Result<()> {
    if let Some(existing) = repository::find_by_slug(kind, parent_id, slug).await? {
        if Some(existing.id.as_str()) != except_id {
            return Err(AppError::Conflict(format!(
                "{} with slug '{}' already exists",
                kind.singular(),
                slug
            ))
            .into());
        }
    }
    Ok(())
}

fn apply_origin(model: &mut Model, origin: Option<OriginSettings>) {
    let Some(origin) = origin else {
        return;
    };
    let t = origin.terminology;
    model.emoji = origin.emoji.filter(|e| !e.trim().is_empty());
    model.level1_label = Some(t.level1_label.trim().to_string());
    model.level1_label_plural = Some(t.level1_label_plural.trim().to_string());
    model.level2_label = Some(t.level2_label.trim().to_string());
    model.level2_label_plural = Some(t.level2_label_plural.trim().to_string());
    model.level2_enabled = t.level2_enabled;
}

fn clean_native(label: Option<String>) -> Option<String> {
    label.map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
}

pub async fn create(kind: RecordKind, payload: NodePayload) -> Result<TaxonomyNode> {
    payload.validate(kind).map_err(AppError::Validation)?;
    let parent_id = if kind.parent_kind().is_some() {
        payload.parent_id.clone()
    } else {
        None
    };
    ensure_parent(kind, parent_id.as_deref()).await?;
    let slug = payload.slug.trim().to_string();
    ensure_unique_slug(kind, parent_id.as_deref(), &slug, None).await?;

    let now = Utc::now();
    let mut model = Model {
        id: uuid::Uuid::new_v4().to_string(),
        kind: kind.key().to_string(),
        parent_id,
        slug,
        label: payload.label.trim().to_string(),
        native_label: clean_native(payload.native_label),
        sort_order: payload.sort_order,
        is_active: payload.is_active,
        is_popular: kind.supports_popular() && payload.is_popular,
        is_protected: false,
        emoji: None,
        level1_label: None,
        level1_label_plural: None,
        level2_label: None,
        level2_label_plural: None,
        level2_enabled: true,
        created_at: Some(now),
        updated_at: Some(now),
        version: 0,
    };
    if kind == RecordKind::Origin {
        apply_origin(&mut model, Some(payload.origin.unwrap_or_default()));
    }

    let saved = repository::insert(model).await?;
    tracing::info!("Created {} '{}' ({})", kind.key(), saved.slug, saved.id);
    with_counts(saved).await
}

/// Родителя при редактировании не меняем: перенос между ветками не поддерживается
pub async fn update(kind: RecordKind, id: &str, payload: NodePayload) -> Result<TaxonomyNode> {
    let mut model = require(kind, id).await?;
    let mut payload = payload;
    if kind.parent_kind().is_some() && payload.parent_id.is_none() {
        payload.parent_id = model.parent_id.clone();
    }
    payload.validate(kind).map_err(AppError::Validation)?;
    if kind.parent_kind().is_some() && payload.parent_id != model.parent_id {
        return Err(AppError::validation("Moving a record to another parent is not supported").into());
    }

    let slug = payload.slug.trim().to_string();
    ensure_unique_slug(kind, model.parent_id.as_deref(), &slug, Some(id)).await?;

    if model.kind == RecordKind::Language.key()
        && model.slug == contracts::domain::a001_taxonomy::node::OTHER_LANGUAGE_SLUG
        && slug != model.slug
    {
        return Err(AppError::validation("The slug of a protected language cannot be changed").into());
    }

    model.slug = slug;
    model.label = payload.label.trim().to_string();
    model.native_label = clean_native(payload.native_label);
    model.sort_order = payload.sort_order;
    model.is_active = payload.is_active;
    model.is_popular = kind.supports_popular() && payload.is_popular;
    if kind == RecordKind::Origin {
        apply_origin(&mut model, payload.origin);
    }

    let saved = repository::update(model).await?;
    with_counts(saved).await
}

/// Удаление с потомками в одной транзакции. Возвращает число удалённых записей
pub async fn delete(kind: RecordKind, id: &str) -> Result<u64> {
    let model = require(kind, id).await?;
    let node = model.clone().into_node(NodeCounts::default())?;
    if node.is_delete_protected() {
        return Err(AppError::Forbidden(format!(
            "{} '{}' is protected and cannot be deleted",
            kind.singular(),
            node.label
        ))
        .into());
    }

    let txn = get_connection().begin().await?;
    let mut ids = vec![model.id.clone()];
    ids.extend(repository::descendant_ids(&txn, &model.id).await?);
    let deleted = repository::delete_many(&txn, &ids).await?;
    txn.commit().await?;

    tracing::info!(
        "Deleted {} '{}' with {} descendant record(s)",
        kind.key(),
        model.slug,
        deleted.saturating_sub(1)
    );
    Ok(deleted)
}

// ============================================================================
// Reorder
// ============================================================================

fn reorder_belongs_to(domain: TaxonomyDomain, reorder_type: ReorderType) -> bool {
    match reorder_type.record_kind() {
        Some(kind) => kind.domain() == domain,
        None => domain == TaxonomyDomain::Languages,
    }
}

/// Новый порядок должен быть ровно перестановкой текущих соседей в области запроса
pub async fn reorder(domain: TaxonomyDomain, request: ReorderRequest) -> Result<()> {
    if !reorder_belongs_to(domain, request.reorder_type) {
        return Err(AppError::validation(format!(
            "Reorder type is not part of {}",
            domain.title().to_lowercase()
        ))
        .into());
    }
    let scope = request.scope();

    match scope.reorder_type.record_kind() {
        Some(kind) => {
            let parent_id = scope_parent(kind, scope.parent_id)?;
            let current: Vec<String> = repository::list_scope(kind, parent_id.as_deref())
                .await?
                .into_iter()
                .map(|m| m.id)
                .collect();
            validate_permutation(&current, &request.ordered_ids).map_err(AppError::Validation)?;

            let txn = get_connection().begin().await?;
            repository::apply_order(&txn, kind, &request.ordered_ids).await?;
            txn.commit().await?;
        }
        None => {
            let country_id = scope
                .parent_id
                .filter(|c| !c.is_empty())
                .ok_or_else(|| AppError::validation("countryId is required"))?;
            let current: Vec<String> = country_language::list_links(&country_id)
                .await?
                .into_iter()
                .map(|l| l.language_id)
                .collect();
            validate_permutation(&current, &request.ordered_ids).map_err(AppError::Validation)?;

            let txn = get_connection().begin().await?;
            country_language::apply_order(&txn, &country_id, &request.ordered_ids).await?;
            txn.commit().await?;
        }
    }
    Ok(())
}

// ============================================================================
// Languages per country
// ============================================================================

pub async fn list_country_languages(country_id: &str) -> Result<Vec<CountryLanguage>> {
    require(RecordKind::Country, country_id).await?;
    country_language::list_for_country(country_id).await
}

pub async fn attach_language(country_id: &str, language_id: &str) -> Result<Vec<CountryLanguage>> {
    require(RecordKind::Country, country_id).await?;
    require(RecordKind::Language, language_id).await?;
    if country_language::get(country_id, language_id).await?.is_some() {
        return Err(AppError::Conflict("Language is already attached to this country".into()).into());
    }
    country_language::insert(country_id, language_id).await?;
    country_language::list_for_country(country_id).await
}

pub async fn detach_language(country_id: &str, language_id: &str) -> Result<()> {
    if !country_language::delete(country_id, language_id).await? {
        return Err(AppError::not_found("Language is not attached to this country").into());
    }
    Ok(())
}

// ============================================================================
// Lookup
// ============================================================================

pub async fn lookup(kind: RecordKind, parent_id: Option<String>) -> Result<Vec<LookupItem>> {
    let parent_id = scope_parent(kind, parent_id)?;
    let items = repository::list_active(kind, parent_id.as_deref())
        .await?
        .into_iter()
        .map(|m| LookupItem {
            id: m.id,
            slug: m.slug,
            label: m.label,
            native_label: m.native_label,
            is_popular: m.is_popular,
        })
        .collect();
    Ok(items)
}

pub async fn update_flags(kind: RecordKind, update: LookupFlagUpdate) -> Result<TaxonomyNode> {
    update.validate(kind).map_err(AppError::Validation)?;
    require(kind, &update.id).await?;
    let saved = repository::set_flags(&update.id, update.is_active, update.is_popular)
        .await?
        .ok_or_else(|| AppError::not_found(format!("{} not found", kind.singular())))?;
    with_counts(saved).await
}

// ============================================================================
// Reference checks for profiles
// ============================================================================

/// Проверка одного звена: запись нужного типа и под выбранным родителем
pub fn check_link(
    kind: RecordKind,
    node: Option<&Model>,
    expected_parent: Option<&str>,
) -> std::result::Result<(), String> {
    let Some(node) = node else {
        return Err(format!("Selected {} no longer exists", kind.singular().to_lowercase()));
    };
    if node.kind != kind.key() {
        return Err(format!("Record {} is not a {}", node.id, kind.singular().to_lowercase()));
    }
    if kind.parent_kind().is_some() && node.parent_id.as_deref() != expected_parent {
        return Err(format!(
            "Selected {} does not belong to the selected {}",
            kind.singular().to_lowercase(),
            kind.parent_kind()
                .map(|p| p.singular().to_lowercase())
                .unwrap_or_default()
        ));
    }
    Ok(())
}

/// Цепочка ссылок от корня к листу, например страна → штат → город.
/// Пустые хвостовые звенья допустимы, разрывы нет
pub async fn check_chain(chain: &[(RecordKind, Option<&str>)]) -> Result<()> {
    let mut parent: Option<&str> = None;
    let mut gap = false;
    for (kind, id) in chain {
        match id {
            None => gap = true,
            Some(id) => {
                if gap {
                    return Err(AppError::validation(format!(
                        "{} is selected without its parent",
                        kind.singular()
                    ))
                    .into());
                }
                let node = repository::get_by_id(id).await?;
                check_link(*kind, node.as_ref(), parent).map_err(AppError::Validation)?;
                parent = Some(id);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str, kind: RecordKind, parent: Option<&str>) -> Model {
        Model {
            id: id.into(),
            kind: kind.key().into(),
            parent_id: parent.map(str::to_string),
            slug: id.into(),
            label: id.into(),
            native_label: None,
            sort_order: 0,
            is_active: true,
            is_popular: false,
            is_protected: false,
            emoji: None,
            level1_label: None,
            level1_label_plural: None,
            level2_label: None,
            level2_label_plural: None,
            level2_enabled: true,
            created_at: None,
            updated_at: None,
            version: 0,
        }
    }

    #[test]
    fn test_reorder_type_must_match_domain() {
        assert!(reorder_belongs_to(TaxonomyDomain::Locations, ReorderType::City));
        assert!(!reorder_belongs_to(TaxonomyDomain::Locations, ReorderType::Caste));
        assert!(reorder_belongs_to(TaxonomyDomain::Languages, ReorderType::CountryLanguage));
        assert!(!reorder_belongs_to(TaxonomyDomain::Education, ReorderType::CountryLanguage));
    }

    #[test]
    fn test_reorder_rejects_ids_from_other_parent() {
        let punjab_cities = vec!["lahore".to_string(), "faisalabad".to_string()];
        let request = vec!["faisalabad".to_string(), "karachi".to_string()];
        assert!(validate_permutation(&punjab_cities, &request).is_err());
    }

    #[test]
    fn test_scope_parent_rules() {
        assert!(scope_parent(RecordKind::State, None).is_err());
        assert!(scope_parent(RecordKind::State, Some("".into())).is_err());
        assert_eq!(
            scope_parent(RecordKind::State, Some("pk".into())).unwrap(),
            Some("pk".into())
        );
        assert_eq!(scope_parent(RecordKind::Country, Some("x".into())).unwrap(), None);
    }

    #[test]
    fn test_check_link() {
        let lahore = model("lahore", RecordKind::City, Some("punjab"));
        assert!(check_link(RecordKind::City, Some(&lahore), Some("punjab")).is_ok());
        assert!(check_link(RecordKind::City, Some(&lahore), Some("sindh")).is_err());
        assert!(check_link(RecordKind::State, Some(&lahore), Some("punjab")).is_err());
        assert!(check_link(RecordKind::City, None, Some("punjab")).is_err());

        let urdu = model("urdu", RecordKind::Language, None);
        assert!(check_link(RecordKind::Language, Some(&urdu), None).is_ok());
    }

    #[test]
    fn test_origin_fields_applied() {
        let mut m = model("pashtun", RecordKind::Origin, None);
        let mut settings = OriginSettings::default();
        settings.emoji = Some(" ".into());
        settings.terminology.level1_label = " Tribe ".into();
        settings.terminology.level2_enabled = false;
        apply_origin(&mut m, Some(settings));
        assert_eq!(m.emoji, None);
        assert_eq!(m.level1_label.as_deref(), Some("Tribe"));
        assert!(!m.level2_enabled);
        let node = m.into_node(NodeCounts::default()).unwrap();
        assert!(!node.terminology().unwrap().level2_enabled);
    }
}
