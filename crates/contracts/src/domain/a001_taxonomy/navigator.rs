use super::kind::RecordKind;
use super::node::TaxonomyNode;

/// Билет загрузки. Ответ с устаревшим билетом отбрасывается
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub level: usize,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Уровня нет в цепочке
    NoSuchLevel(usize),
    /// Подуровень отключён настройками родителя (Origin.level2Enabled = false)
    LevelDisabled(usize),
}

impl std::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavigationError::NoSuchLevel(l) => write!(f, "Level {} does not exist", l),
            NavigationError::LevelDisabled(l) => write!(f, "Level {} is disabled", l),
        }
    }
}

/// Навигация по цепочке уровней справочника (Country → State → City и т.п.)
///
/// `selections[i]`: выбранный узел уровня `i`; список уровня `i + 1`
/// загружается для него. Все более глубокие выборы сбрасываются при смене.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNavigator {
    chain: Vec<RecordKind>,
    selections: Vec<TaxonomyNode>,
    active_level: usize,
    generation: u64,
}

impl HierarchyNavigator {
    pub fn new(chain: &[RecordKind]) -> Self {
        Self {
            chain: chain.to_vec(),
            selections: Vec::new(),
            active_level: 0,
            generation: 0,
        }
    }

    pub fn chain(&self) -> &[RecordKind] {
        &self.chain
    }

    pub fn active_level(&self) -> usize {
        self.active_level
    }

    pub fn active_kind(&self) -> RecordKind {
        self.chain[self.active_level]
    }

    pub fn selection(&self, level: usize) -> Option<&TaxonomyNode> {
        self.selections.get(level)
    }

    pub fn selections(&self) -> &[TaxonomyNode] {
        &self.selections
    }

    /// Родитель для списка уровня `level` (None для корня)
    pub fn parent_for(&self, level: usize) -> Option<&TaxonomyNode> {
        if level == 0 {
            None
        } else {
            self.selections.get(level - 1)
        }
    }

    pub fn active_parent_id(&self) -> Option<String> {
        self.parent_for(self.active_level).map(|n| n.id.clone())
    }

    /// Корневой узел ветки происхождения, если цепочка начинается с Origin
    fn origin_root(&self) -> Option<&TaxonomyNode> {
        match self.chain.first() {
            Some(RecordKind::Origin) => self.selections.first(),
            _ => None,
        }
    }

    /// Включён ли уровень настройками выбранных предков
    fn level_allowed(&self, level: usize) -> bool {
        if self.chain.get(level) == Some(&RecordKind::Caste) {
            if let Some(origin) = self.origin_root() {
                return origin
                    .terminology()
                    .map(|t| t.level2_enabled)
                    .unwrap_or(true);
            }
        }
        true
    }

    /// Вкладка уровня активна: корень всегда, остальные: при выбранном родителе
    pub fn is_tab_enabled(&self, level: usize) -> bool {
        if level >= self.chain.len() {
            return false;
        }
        level == 0 || (self.selections.len() >= level && self.level_allowed(level))
    }

    /// Можно ли провалиться из узла уровня `level` в его детей
    pub fn can_descend(&self, level: usize) -> bool {
        level + 1 < self.chain.len() && self.level_allowed(level + 1)
    }

    /// Подпись уровня с учётом терминологии выбранного Origin
    pub fn level_label(&self, level: usize) -> String {
        let kind = self.chain[level];
        match self.origin_root().and_then(|o| o.terminology()) {
            Some(t) if level > 0 => t.label_for(kind, true),
            _ => kind.plural().to_string(),
        }
    }

    fn next_ticket(&mut self, level: usize) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            level,
            generation: self.generation,
        }
    }

    /// Выбрать узел уровня `level`: сбросить глубже, переключиться на уровень детей,
    /// вернуть билет загрузки детей
    pub fn select_node(
        &mut self,
        level: usize,
        node: TaxonomyNode,
    ) -> Result<LoadTicket, NavigationError> {
        if level >= self.chain.len() || level > self.selections.len() {
            return Err(NavigationError::NoSuchLevel(level));
        }
        if level + 1 >= self.chain.len() {
            return Err(NavigationError::NoSuchLevel(level + 1));
        }

        // Проверяем доступность уровня детей с учётом нового выбора
        let mut selections = self.selections.clone();
        selections.truncate(level);
        selections.push(node.clone());
        let candidate = HierarchyNavigator {
            chain: self.chain.clone(),
            selections,
            active_level: self.active_level,
            generation: self.generation,
        };
        if !candidate.level_allowed(level + 1) {
            return Err(NavigationError::LevelDisabled(level + 1));
        }

        self.selections.truncate(level);
        self.selections.push(node);
        self.active_level = level + 1;
        Ok(self.next_ticket(level + 1))
    }

    /// Вернуться на уровень `to_level`, сбросив всё глубже.
    /// Возвращает билет перезагрузки списка этого уровня
    pub fn go_back(&mut self, to_level: usize) -> LoadTicket {
        let to_level = to_level.min(self.chain.len().saturating_sub(1));
        self.selections.truncate(to_level);
        self.active_level = to_level;
        self.next_ticket(to_level)
    }

    /// Билет на повторную загрузку активного уровня ("Try again", обновление после записи)
    pub fn reload(&mut self) -> LoadTicket {
        let level = self.active_level;
        self.next_ticket(level)
    }

    /// Ответ актуален, только если после него не было новых запросов
    pub fn accepts(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation && ticket.level == self.active_level
    }

    /// Обновить сохранённый выбор (например, после редактирования записи)
    pub fn refresh_selection(&mut self, node: &TaxonomyNode) {
        if let Some(sel) = self.selections.iter_mut().find(|s| s.id == node.id) {
            *sel = node.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_taxonomy::node::{OriginSettings, OriginTerminology};

    fn node(id: &str, kind: RecordKind) -> TaxonomyNode {
        TaxonomyNode {
            id: id.into(),
            kind,
            parent_id: None,
            slug: id.into(),
            label: id.to_uppercase(),
            native_label: None,
            sort_order: 0,
            is_active: true,
            is_popular: false,
            is_protected: false,
            child_count: 0,
            profile_count: 0,
            origin: None,
        }
    }

    fn origin(id: &str, level2_enabled: bool) -> TaxonomyNode {
        let mut n = node(id, RecordKind::Origin);
        n.origin = Some(OriginSettings {
            emoji: None,
            terminology: OriginTerminology {
                level2_enabled,
                level1_label_plural: "Tribes".into(),
                ..Default::default()
            },
        });
        n
    }

    const LOCATIONS: &[RecordKind] = &[RecordKind::Country, RecordKind::State, RecordKind::City];
    const ORIGINS: &[RecordKind] = &[RecordKind::Origin, RecordKind::Ethnicity, RecordKind::Caste];

    #[test]
    fn test_select_clears_deeper_levels() {
        let mut nav = HierarchyNavigator::new(LOCATIONS);
        nav.select_node(0, node("pk", RecordKind::Country)).unwrap();
        nav.select_node(1, node("punjab", RecordKind::State)).unwrap();
        assert_eq!(nav.active_level(), 2);
        assert_eq!(nav.active_kind(), RecordKind::City);

        nav.select_node(0, node("in", RecordKind::Country)).unwrap();
        assert_eq!(nav.selections().len(), 1);
        assert_eq!(nav.active_level(), 1);
        assert_eq!(nav.active_parent_id().as_deref(), Some("in"));
        assert!(!nav.is_tab_enabled(2));
    }

    #[test]
    fn test_go_back() {
        let mut nav = HierarchyNavigator::new(LOCATIONS);
        nav.select_node(0, node("pk", RecordKind::Country)).unwrap();
        nav.select_node(1, node("punjab", RecordKind::State)).unwrap();
        nav.go_back(0);
        assert_eq!(nav.active_level(), 0);
        assert!(nav.selections().is_empty());
        assert_eq!(nav.active_parent_id(), None);
    }

    #[test]
    fn test_level2_disabled_refuses_navigation() {
        let mut nav = HierarchyNavigator::new(ORIGINS);
        nav.select_node(0, origin("pashtun", false)).unwrap();
        assert!(!nav.can_descend(1));
        let before = nav.clone();
        let err = nav.select_node(1, node("yusufzai", RecordKind::Ethnicity));
        assert_eq!(err, Err(NavigationError::LevelDisabled(2)));
        assert_eq!(nav, before);
        assert!(!nav.is_tab_enabled(2));
        assert_eq!(nav.level_label(1), "Tribes");
    }

    #[test]
    fn test_level2_enabled_allows_navigation() {
        let mut nav = HierarchyNavigator::new(ORIGINS);
        nav.select_node(0, origin("punjabi", true)).unwrap();
        assert!(nav.select_node(1, node("jat", RecordKind::Ethnicity)).is_ok());
        assert_eq!(nav.active_kind(), RecordKind::Caste);
    }

    #[test]
    fn test_stale_ticket_is_rejected() {
        let mut nav = HierarchyNavigator::new(LOCATIONS);
        let first = nav.select_node(0, node("pk", RecordKind::Country)).unwrap();
        let second = nav.select_node(0, node("in", RecordKind::Country)).unwrap();
        assert!(!nav.accepts(first));
        assert!(nav.accepts(second));
        let back = nav.go_back(0);
        assert!(!nav.accepts(second));
        assert!(nav.accepts(back));
    }

    #[test]
    fn test_leaf_level_cannot_be_selected_into() {
        let mut nav = HierarchyNavigator::new(&[RecordKind::Language]);
        assert_eq!(
            nav.select_node(0, node("ur", RecordKind::Language)),
            Err(NavigationError::NoSuchLevel(1))
        );
    }
}
