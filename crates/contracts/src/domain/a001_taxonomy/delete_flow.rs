use super::kind::RecordKind;
use super::node::{OriginTerminology, TaxonomyNode};

/// Диалог подтверждения удаления
///
/// `Closed → Open → InFlight → Closed`; при ошибке DELETE возвращаемся в `Open`
/// с текстом ошибки, отмена из `Open` закрывает диалог без запроса.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DeleteFlow {
    #[default]
    Closed,
    Open {
        target: TaxonomyNode,
        error: Option<String>,
    },
    InFlight {
        target: TaxonomyNode,
    },
}

impl DeleteFlow {
    /// Открыть диалог. Защищённые записи диалог не открывают
    pub fn open(&mut self, target: TaxonomyNode) -> bool {
        if target.is_delete_protected() || matches!(self, DeleteFlow::InFlight { .. }) {
            return false;
        }
        *self = DeleteFlow::Open {
            target,
            error: None,
        };
        true
    }

    pub fn cancel(&mut self) {
        if let DeleteFlow::Open { .. } = self {
            *self = DeleteFlow::Closed;
        }
    }

    /// Подтверждение: возвращает путь DELETE, если запрос нужно отправить
    pub fn confirm(&mut self) -> Option<String> {
        match std::mem::take(self) {
            DeleteFlow::Open { target, .. } => {
                let path = target.kind.item_path(&target.id);
                *self = DeleteFlow::InFlight { target };
                Some(path)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Сервер удалил запись: диалог закрывается, вызывающий перечитывает список
    pub fn succeeded(&mut self) {
        if let DeleteFlow::InFlight { .. } = self {
            *self = DeleteFlow::Closed;
        }
    }

    pub fn failed(&mut self, message: String) {
        if let DeleteFlow::InFlight { target } = std::mem::take(self) {
            *self = DeleteFlow::Open {
                target,
                error: Some(message),
            };
        }
    }

    pub fn target(&self) -> Option<&TaxonomyNode> {
        match self {
            DeleteFlow::Closed => None,
            DeleteFlow::Open { target, .. } | DeleteFlow::InFlight { target } => Some(target),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DeleteFlow::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DeleteFlow::Closed)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, DeleteFlow::InFlight { .. })
    }
}

/// Подписи типов-потомков во множественном числе, в нижнем регистре
fn descendant_labels(kind: RecordKind, terminology: Option<&OriginTerminology>) -> Vec<String> {
    kind.descendant_kinds()
        .into_iter()
        .map(|k| match terminology {
            Some(t) => t.label_for(k, true),
            None => k.plural().to_string(),
        })
        .map(|s| s.to_lowercase())
        .collect()
}

fn join_labels(labels: &[String]) -> String {
    match labels {
        [] => String::new(),
        [one] => one.clone(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}

/// Текст предупреждения: имя записи и все типы потомков, которые будут удалены.
/// `terminology`: настройки Origin, к ветке которого относится запись
pub fn cascade_warning(target: &TaxonomyNode, terminology: Option<&OriginTerminology>) -> String {
    let terminology = terminology.or_else(|| target.terminology());
    let title = match terminology {
        Some(t) => t.label_for(target.kind, false),
        None => target.kind.singular().to_string(),
    };
    let mut text = format!(
        "Delete {} \"{}\"? This cannot be undone.",
        title.to_lowercase(),
        target.label
    );
    // Вкладка кастов может быть отключена, но строки в базе остаются, их тоже удалим
    let labels = descendant_labels(target.kind, terminology);
    if !labels.is_empty() {
        text.push_str(&format!(
            " All {} under it will be deleted as well.",
            join_labels(&labels)
        ));
    }
    if target.profile_count > 0 {
        text.push_str(&format!(
            " {} profile(s) reference this record.",
            target.profile_count
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_taxonomy::node::{OriginSettings, OTHER_LANGUAGE_SLUG};

    fn node(kind: RecordKind, slug: &str, label: &str) -> TaxonomyNode {
        TaxonomyNode {
            id: format!("{}-id", slug),
            kind,
            parent_id: None,
            slug: slug.into(),
            label: label.into(),
            native_label: None,
            sort_order: 0,
            is_active: true,
            is_popular: false,
            is_protected: false,
            child_count: 3,
            profile_count: 0,
            origin: None,
        }
    }

    #[test]
    fn test_country_warning_names_both_descendant_kinds() {
        let pk = node(RecordKind::Country, "pk", "Pakistan");
        let text = cascade_warning(&pk, None);
        assert!(text.contains("Pakistan"));
        assert!(text.contains("states and cities"));
    }

    #[test]
    fn test_origin_warning_uses_terminology() {
        let mut origin = node(RecordKind::Origin, "pashtun", "Pashtun");
        origin.origin = Some(OriginSettings {
            emoji: None,
            terminology: OriginTerminology {
                level1_label: "Tribe".into(),
                level1_label_plural: "Tribes".into(),
                level2_label: "Clan".into(),
                level2_label_plural: "Clans".into(),
                level2_enabled: true,
            },
        });
        let text = cascade_warning(&origin, None);
        assert!(text.contains("tribes and clans"));
    }

    #[test]
    fn test_leaf_warning_has_no_cascade() {
        let city = node(RecordKind::City, "lahore", "Lahore");
        assert!(!cascade_warning(&city, None).contains("under it"));
    }

    #[test]
    fn test_flow_transitions() {
        let mut flow = DeleteFlow::default();
        assert!(flow.open(node(RecordKind::Sect, "sunni", "Sunni")));
        let path = flow.confirm().unwrap();
        assert_eq!(path, "/api/admin/global-settings/sects/sects/sunni-id");
        assert!(flow.is_in_flight());
        // второй confirm, пока запрос в полёте, ничего не делает
        assert_eq!(flow.confirm(), None);

        flow.failed("HTTP 500".into());
        assert_eq!(flow.error(), Some("HTTP 500"));
        assert!(flow.is_open());

        flow.confirm().unwrap();
        flow.succeeded();
        assert_eq!(flow, DeleteFlow::Closed);
    }

    #[test]
    fn test_cancel_issues_nothing() {
        let mut flow = DeleteFlow::default();
        flow.open(node(RecordKind::Level, "phd", "PhD"));
        flow.cancel();
        assert_eq!(flow, DeleteFlow::Closed);
        assert_eq!(flow.confirm(), None);
    }

    #[test]
    fn test_protected_record_never_opens() {
        let mut flow = DeleteFlow::default();
        let other = node(RecordKind::Language, OTHER_LANGUAGE_SLUG, "Other");
        assert!(!flow.open(other));
        assert_eq!(flow, DeleteFlow::Closed);

        let mut flagged = node(RecordKind::Country, "xx", "System");
        flagged.is_protected = true;
        assert!(!flow.open(flagged));
    }
}
