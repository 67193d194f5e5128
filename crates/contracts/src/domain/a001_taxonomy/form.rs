//! Форма создания/редактирования записи справочника
//!
//! Вместо общего состояния "на все случаи": вариант на каждую форму записи
//! со своими полями. Диалог сопоставляет вариант и рисует нужную группу полей.

use serde::{Deserialize, Serialize};

use super::kind::RecordKind;
use super::node::{
    NodePayload, OriginSettings, OriginTerminology, TaxonomyNode, SORT_ORDER_MAX, SORT_ORDER_MIN,
};

/// Поля, общие для всех записей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonFields {
    pub slug: String,
    pub label: String,
    pub native_label: String,
    pub sort_order: i32,
    pub is_active: bool,
}

impl CommonFields {
    fn empty(sort_order: i32) -> Self {
        Self {
            slug: String::new(),
            label: String::new(),
            native_label: String::new(),
            sort_order,
            is_active: true,
        }
    }

    fn from_node(node: &TaxonomyNode) -> Self {
        Self {
            slug: node.slug.clone(),
            label: node.label.clone(),
            native_label: node.native_label.clone().unwrap_or_default(),
            sort_order: node.sort_order,
            is_active: node.is_active,
        }
    }
}

/// Форма записи: вариант определяет набор полей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RecordForm {
    /// Корневые записи без особых полей: level, field, language, country, sect
    Plain { kind: RecordKind, common: CommonFields },
    /// Второй уровень: state, ethnicity, maslak
    Nested {
        kind: RecordKind,
        parent_id: String,
        common: CommonFields,
    },
    /// Третий уровень: city, caste
    Leaf {
        kind: RecordKind,
        parent_id: String,
        common: CommonFields,
        is_popular: bool,
    },
    /// Origin: терминология подуровней и эмодзи
    Origin {
        common: CommonFields,
        emoji: String,
        terminology: OriginTerminology,
    },
}

/// HTTP-метод отправки формы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMethod {
    Post,
    Patch,
}

/// Куда и как отправить форму
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTarget {
    pub method: SubmitMethod,
    pub path: String,
    pub payload: NodePayload,
}

impl RecordForm {
    /// Пустой шаблон для создания: активна, позиция в конце списка
    pub fn empty(kind: RecordKind, parent_id: Option<String>, next_sort_order: i32) -> Self {
        let common = CommonFields::empty(next_sort_order.clamp(SORT_ORDER_MIN, SORT_ORDER_MAX));
        let parent_id = parent_id.unwrap_or_default();
        match kind {
            RecordKind::Origin => RecordForm::Origin {
                common,
                emoji: String::new(),
                terminology: OriginTerminology::default(),
            },
            k if k.depth() == 3 => RecordForm::Leaf {
                kind: k,
                parent_id,
                common,
                is_popular: false,
            },
            k if k.depth() == 2 => RecordForm::Nested {
                kind: k,
                parent_id,
                common,
            },
            k => RecordForm::Plain { kind: k, common },
        }
    }

    /// Копия полей существующей записи для редактирования
    pub fn from_node(node: &TaxonomyNode) -> Self {
        let common = CommonFields::from_node(node);
        let parent_id = node.parent_id.clone().unwrap_or_default();
        match node.kind {
            RecordKind::Origin => {
                let settings = node.origin.clone().unwrap_or_default();
                RecordForm::Origin {
                    common,
                    emoji: settings.emoji.unwrap_or_default(),
                    terminology: settings.terminology,
                }
            }
            k if k.depth() == 3 => RecordForm::Leaf {
                kind: k,
                parent_id,
                common,
                is_popular: node.is_popular,
            },
            k if k.depth() == 2 => RecordForm::Nested {
                kind: k,
                parent_id,
                common,
            },
            k => RecordForm::Plain { kind: k, common },
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            RecordForm::Plain { kind, .. }
            | RecordForm::Nested { kind, .. }
            | RecordForm::Leaf { kind, .. } => *kind,
            RecordForm::Origin { .. } => RecordKind::Origin,
        }
    }

    pub fn common(&self) -> &CommonFields {
        match self {
            RecordForm::Plain { common, .. }
            | RecordForm::Nested { common, .. }
            | RecordForm::Leaf { common, .. }
            | RecordForm::Origin { common, .. } => common,
        }
    }

    pub fn common_mut(&mut self) -> &mut CommonFields {
        match self {
            RecordForm::Plain { common, .. }
            | RecordForm::Nested { common, .. }
            | RecordForm::Leaf { common, .. }
            | RecordForm::Origin { common, .. } => common,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            RecordForm::Nested { parent_id, .. } | RecordForm::Leaf { parent_id, .. } => {
                Some(parent_id.as_str())
            }
            _ => None,
        }
    }

    /// Переключатель второго подуровня у Origin. Значения подписей не трогаются
    pub fn set_level2_enabled(&mut self, enabled: bool) {
        if let RecordForm::Origin { terminology, .. } = self {
            terminology.level2_enabled = enabled;
        }
    }

    /// Показывать ли поля подписи второго подуровня
    pub fn shows_level2_fields(&self) -> bool {
        matches!(self, RecordForm::Origin { terminology, .. } if terminology.level2_enabled)
    }

    /// Незаполненные обязательные поля (подписи для UI)
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let common = self.common();
        if common.slug.trim().is_empty() {
            missing.push("Slug");
        }
        if common.label.trim().is_empty() {
            missing.push("Label");
        }
        if let Some(parent) = self.parent_id() {
            if parent.trim().is_empty() {
                missing.push("Parent");
            }
        }
        if let RecordForm::Origin { terminology, .. } = self {
            if terminology.level1_label.trim().is_empty() {
                missing.push("Level 1 label");
            }
            if terminology.level2_enabled && terminology.level2_label.trim().is_empty() {
                missing.push("Level 2 label");
            }
        }
        missing
    }

    pub fn sort_order_in_bounds(&self) -> bool {
        (SORT_ORDER_MIN..=SORT_ORDER_MAX).contains(&self.common().sort_order)
    }

    /// Кнопка "Сохранить" активна только при заполненных полях
    pub fn can_submit(&self) -> bool {
        self.missing_required().is_empty() && self.sort_order_in_bounds()
    }

    /// Тело запроса. Подписи второго подуровня уходят даже при выключенном уровне
    pub fn to_payload(&self) -> NodePayload {
        let common = self.common();
        let native_label = if common.native_label.trim().is_empty() {
            None
        } else {
            Some(common.native_label.trim().to_string())
        };
        let mut payload = NodePayload {
            parent_id: self.parent_id().map(str::to_string),
            slug: common.slug.trim().to_string(),
            label: common.label.trim().to_string(),
            native_label,
            sort_order: common.sort_order,
            is_active: common.is_active,
            is_popular: false,
            origin: None,
        };
        match self {
            RecordForm::Leaf { is_popular, .. } => payload.is_popular = *is_popular,
            RecordForm::Origin {
                emoji, terminology, ..
            } => {
                payload.origin = Some(OriginSettings {
                    emoji: if emoji.trim().is_empty() {
                        None
                    } else {
                        Some(emoji.trim().to_string())
                    },
                    terminology: terminology.clone(),
                });
            }
            _ => {}
        }
        payload
    }

    /// POST для новой записи, PATCH при наличии id. None: форма не готова к отправке
    pub fn submit_target(&self, editing_id: Option<&str>) -> Option<SubmitTarget> {
        if !self.can_submit() {
            return None;
        }
        let kind = self.kind();
        let (method, path) = match editing_id {
            Some(id) if !id.is_empty() => (SubmitMethod::Patch, kind.item_path(id)),
            _ => (SubmitMethod::Post, kind.collection_path()),
        };
        Some(SubmitTarget {
            method,
            path,
            payload: self.to_payload(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_node(level2_enabled: bool) -> TaxonomyNode {
        TaxonomyNode {
            id: "o1".into(),
            kind: RecordKind::Origin,
            parent_id: None,
            slug: "pashtun".into(),
            label: "Pashtun".into(),
            native_label: None,
            sort_order: 4,
            is_active: true,
            is_popular: false,
            is_protected: false,
            child_count: 2,
            profile_count: 10,
            origin: Some(OriginSettings {
                emoji: Some("🏔".into()),
                terminology: OriginTerminology {
                    level1_label: "Tribe".into(),
                    level1_label_plural: "Tribes".into(),
                    level2_label: "Sub-tribe".into(),
                    level2_label_plural: "Sub-tribes".into(),
                    level2_enabled,
                },
            }),
        }
    }

    #[test]
    fn test_empty_template_defaults() {
        let form = RecordForm::empty(RecordKind::City, Some("punjab".into()), 7);
        assert!(matches!(form, RecordForm::Leaf { .. }));
        assert!(form.common().is_active);
        assert_eq!(form.common().sort_order, 7);
        assert_eq!(form.parent_id(), Some("punjab"));
        assert!(matches!(
            RecordForm::empty(RecordKind::Sect, None, 0),
            RecordForm::Plain { .. }
        ));
        assert!(matches!(
            RecordForm::empty(RecordKind::Maslak, Some("s".into()), 0),
            RecordForm::Nested { .. }
        ));
    }

    #[test]
    fn test_blank_label_never_submits() {
        let mut form = RecordForm::empty(RecordKind::Language, None, 0);
        form.common_mut().slug = "urdu".into();
        assert_eq!(form.submit_target(None), None);
        assert_eq!(form.missing_required(), vec!["Label"]);

        form.common_mut().label = "   ".into();
        assert_eq!(form.submit_target(None), None);

        form.common_mut().label = "Urdu".into();
        let target = form.submit_target(None).unwrap();
        assert_eq!(target.method, SubmitMethod::Post);
        assert_eq!(target.path, "/api/admin/global-settings/languages/languages");
    }

    #[test]
    fn test_edit_uses_patch() {
        let form = RecordForm::from_node(&origin_node(true));
        let target = form.submit_target(Some("o1")).unwrap();
        assert_eq!(target.method, SubmitMethod::Patch);
        assert_eq!(target.path, "/api/admin/global-settings/origins/origins/o1");
    }

    #[test]
    fn test_origin_level2_toggle_keeps_values() {
        let mut form = RecordForm::from_node(&origin_node(false));
        assert!(!form.shows_level2_fields());

        // выключенный уровень не стирает подписи из тела запроса
        let payload = form.to_payload();
        let terms = payload.origin.unwrap().terminology;
        assert_eq!(terms.level2_label, "Sub-tribe");
        assert!(!terms.level2_enabled);

        form.set_level2_enabled(true);
        assert!(form.shows_level2_fields());
        match &form {
            RecordForm::Origin {
                common,
                emoji,
                terminology,
            } => {
                assert_eq!(terminology.level2_label, "Sub-tribe");
                assert_eq!(terminology.level2_label_plural, "Sub-tribes");
                assert_eq!(common.slug, "pashtun");
                assert_eq!(common.sort_order, 4);
                assert_eq!(emoji, "🏔");
            }
            _ => panic!("expected origin form"),
        }
    }

    #[test]
    fn test_sort_order_bounds() {
        let mut form = RecordForm::empty(RecordKind::Level, None, 0);
        form.common_mut().slug = "bachelors".into();
        form.common_mut().label = "Bachelors".into();
        form.common_mut().sort_order = -1;
        assert!(!form.can_submit());
        form.common_mut().sort_order = 3;
        assert!(form.can_submit());
    }

    #[test]
    fn test_leaf_payload_carries_popular_and_parent() {
        let mut form = RecordForm::empty(RecordKind::Caste, Some("jat".into()), 0);
        form.common_mut().slug = "sandhu".into();
        form.common_mut().label = "Sandhu".into();
        if let RecordForm::Leaf { is_popular, .. } = &mut form {
            *is_popular = true;
        }
        let payload = form.to_payload();
        assert!(payload.is_popular);
        assert_eq!(payload.parent_id.as_deref(), Some("jat"));
        assert!(payload.validate(RecordKind::Caste).is_ok());
    }

    #[test]
    fn test_nested_without_parent_is_inert() {
        let mut form = RecordForm::empty(RecordKind::State, None, 0);
        form.common_mut().slug = "sindh".into();
        form.common_mut().label = "Sindh".into();
        assert_eq!(form.missing_required(), vec!["Parent"]);
        assert!(form.submit_target(None).is_none());
    }
}
