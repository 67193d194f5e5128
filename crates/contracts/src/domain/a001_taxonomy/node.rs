use serde::{Deserialize, Serialize};

use super::kind::RecordKind;
use crate::domain::common::AggregateRoot;

/// Slug системной записи "другой язык": удалять нельзя ни при каких флагах
pub const OTHER_LANGUAGE_SLUG: &str = "other_language";

pub const SORT_ORDER_MIN: i32 = 0;
pub const SORT_ORDER_MAX: i32 = 9999;

// ============================================================================
// Origin terminology
// ============================================================================

/// Настраиваемая терминология происхождения: "Ethnicity"/"Caste" сами являются данными
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginTerminology {
    pub level1_label: String,
    pub level1_label_plural: String,
    pub level2_label: String,
    pub level2_label_plural: String,
    /// false: второй подуровень (касты) отключён целиком
    pub level2_enabled: bool,
}

impl Default for OriginTerminology {
    fn default() -> Self {
        Self {
            level1_label: "Ethnicity".into(),
            level1_label_plural: "Ethnicities".into(),
            level2_label: "Caste".into(),
            level2_label_plural: "Castes".into(),
            level2_enabled: true,
        }
    }
}

impl OriginTerminology {
    /// Отображаемое имя уровня для типа внутри ветки происхождения
    pub fn label_for(&self, kind: RecordKind, plural: bool) -> String {
        match (kind, plural) {
            (RecordKind::Ethnicity, false) => self.level1_label.clone(),
            (RecordKind::Ethnicity, true) => self.level1_label_plural.clone(),
            (RecordKind::Caste, false) => self.level2_label.clone(),
            (RecordKind::Caste, true) => self.level2_label_plural.clone(),
            (k, false) => k.singular().to_string(),
            (k, true) => k.plural().to_string(),
        }
    }
}

/// Поля, которые есть только у записи Origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OriginSettings {
    pub emoji: Option<String>,
    #[serde(flatten)]
    pub terminology: OriginTerminology,
}

// ============================================================================
// Node
// ============================================================================

/// Узел справочника любого уровня (страна, штат, город, каста, мазхаб, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyNode {
    pub id: String,
    pub kind: RecordKind,
    pub parent_id: Option<String>,
    pub slug: String,
    pub label: String,
    pub native_label: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_protected: bool,
    /// Агрегаты считаются сервером при каждом чтении, клиент их не пишет
    #[serde(default)]
    pub child_count: i64,
    #[serde(default)]
    pub profile_count: i64,
    #[serde(default)]
    pub origin: Option<OriginSettings>,
}

impl TaxonomyNode {
    /// Можно ли удалить запись (серверный флаг + жёсткое правило other_language)
    pub fn is_delete_protected(&self) -> bool {
        self.is_protected
            || (self.kind == RecordKind::Language && self.slug == OTHER_LANGUAGE_SLUG)
    }

    pub fn terminology(&self) -> Option<&OriginTerminology> {
        self.origin.as_ref().map(|o| &o.terminology)
    }

    pub fn display_label(&self) -> String {
        match (&self.origin, &self.native_label) {
            (Some(OriginSettings { emoji: Some(e), .. }), _) if !e.is_empty() => {
                format!("{} {}", e, self.label)
            }
            (_, Some(native)) if !native.is_empty() => format!("{} ({})", self.label, native),
            _ => self.label.clone(),
        }
    }
}

impl AggregateRoot for TaxonomyNode {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "taxonomy_node"
    }

    fn element_name() -> &'static str {
        "Taxonomy record"
    }

    fn list_name() -> &'static str {
        "Taxonomy"
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Тело POST/PATCH записи справочника. Поля, не относящиеся к типу, игнорируются
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodePayload {
    pub parent_id: Option<String>,
    pub slug: String,
    pub label: String,
    pub native_label: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub origin: Option<OriginSettings>,
}

impl NodePayload {
    /// Серверная проверка обязательных полей и границ
    pub fn validate(&self, kind: RecordKind) -> Result<(), String> {
        if self.slug.trim().is_empty() {
            return Err("Slug is required".into());
        }
        if !self
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err("Slug may contain only lowercase latin letters, digits, '_' and '-'".into());
        }
        if self.label.trim().is_empty() {
            return Err("Label is required".into());
        }
        if !(SORT_ORDER_MIN..=SORT_ORDER_MAX).contains(&self.sort_order) {
            return Err(format!(
                "Sort order must be between {} and {}",
                SORT_ORDER_MIN, SORT_ORDER_MAX
            ));
        }
        match (kind.parent_kind(), self.parent_id.as_deref()) {
            (Some(parent), None) | (Some(parent), Some("")) => {
                return Err(format!("{} is required", parent.singular()));
            }
            _ => {}
        }
        if kind == RecordKind::Origin {
            if let Some(origin) = &self.origin {
                let t = &origin.terminology;
                if t.level1_label.trim().is_empty() {
                    return Err("Level 1 label is required".into());
                }
                if t.level2_enabled && t.level2_label.trim().is_empty() {
                    return Err("Level 2 label is required while level 2 is enabled".into());
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeListResponse {
    pub items: Vec<TaxonomyNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeResponse {
    pub item: TaxonomyNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Сколько записей удалено вместе с потомками
    pub deleted: u64,
}

/// Query для списков: `?parentId=<id>`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub parent_id: Option<String>,
}

// ============================================================================
// Languages per country
// ============================================================================

/// Язык, привязанный к стране, в порядке отображения для этой страны
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryLanguage {
    pub country_id: String,
    pub language_id: String,
    pub label: String,
    pub slug: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryLanguageListResponse {
    pub items: Vec<CountryLanguage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryLanguageQuery {
    pub country_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachLanguageRequest {
    pub country_id: String,
    pub language_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(TaxonomyNode::full_name(), "a001_taxonomy_node");
        assert_eq!(TaxonomyNode::table_prefix(), "a001_taxonomy_node_");
    }

    fn language(slug: &str, is_protected: bool) -> TaxonomyNode {
        TaxonomyNode {
            id: "l1".into(),
            kind: RecordKind::Language,
            parent_id: None,
            slug: slug.into(),
            label: "Other".into(),
            native_label: None,
            sort_order: 0,
            is_active: true,
            is_popular: false,
            is_protected,
            child_count: 0,
            profile_count: 0,
            origin: None,
        }
    }

    #[test]
    fn test_other_language_always_protected() {
        assert!(language(OTHER_LANGUAGE_SLUG, false).is_delete_protected());
        assert!(language(OTHER_LANGUAGE_SLUG, true).is_delete_protected());
        assert!(!language("urdu", false).is_delete_protected());
        assert!(language("urdu", true).is_delete_protected());
    }

    #[test]
    fn test_payload_validation() {
        let mut p = NodePayload {
            slug: "punjab".into(),
            label: "Punjab".into(),
            is_active: true,
            ..Default::default()
        };
        assert!(p.validate(RecordKind::State).is_err());
        p.parent_id = Some("pk".into());
        assert!(p.validate(RecordKind::State).is_ok());
        p.sort_order = 10_000;
        assert!(p.validate(RecordKind::State).is_err());
        p.sort_order = 3;
        p.slug = "Bad Slug".into();
        assert!(p.validate(RecordKind::State).is_err());
    }

    #[test]
    fn test_terminology_labels() {
        let t = OriginTerminology {
            level1_label: "Tribe".into(),
            level1_label_plural: "Tribes".into(),
            level2_label: "Sub-tribe".into(),
            level2_label_plural: "Sub-tribes".into(),
            level2_enabled: true,
        };
        assert_eq!(t.label_for(RecordKind::Ethnicity, true), "Tribes");
        assert_eq!(t.label_for(RecordKind::Caste, false), "Sub-tribe");
        assert_eq!(t.label_for(RecordKind::Origin, false), "Origin");
    }

    #[test]
    fn test_origin_settings_json_is_flat() {
        let s = OriginSettings {
            emoji: Some("🏔".into()),
            terminology: OriginTerminology::default(),
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["level2Enabled"], serde_json::json!(true));
        assert_eq!(v["level1Label"], serde_json::json!("Ethnicity"));
    }
}
