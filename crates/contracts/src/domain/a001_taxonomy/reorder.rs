//! Перестановка соседних записей на ±1 позицию
//!
//! Схема для любого списка: применить локально → отправить весь порядок
//! на сервер → при ошибке выбросить локальное состояние и перечитать список.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::kind::RecordKind;
use super::node::{CountryLanguage, TaxonomyNode};

// ============================================================================
// Wire format
// ============================================================================

/// Что переупорядочиваем: записи одного типа или языки внутри страны
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderType {
    Level,
    Field,
    Language,
    Country,
    State,
    City,
    Origin,
    Ethnicity,
    Caste,
    Sect,
    Maslak,
    CountryLanguage,
}

impl ReorderType {
    pub fn record_kind(&self) -> Option<RecordKind> {
        match self {
            ReorderType::Level => Some(RecordKind::Level),
            ReorderType::Field => Some(RecordKind::Field),
            ReorderType::Language => Some(RecordKind::Language),
            ReorderType::Country => Some(RecordKind::Country),
            ReorderType::State => Some(RecordKind::State),
            ReorderType::City => Some(RecordKind::City),
            ReorderType::Origin => Some(RecordKind::Origin),
            ReorderType::Ethnicity => Some(RecordKind::Ethnicity),
            ReorderType::Caste => Some(RecordKind::Caste),
            ReorderType::Sect => Some(RecordKind::Sect),
            ReorderType::Maslak => Some(RecordKind::Maslak),
            ReorderType::CountryLanguage => None,
        }
    }
}

impl From<RecordKind> for ReorderType {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Level => ReorderType::Level,
            RecordKind::Field => ReorderType::Field,
            RecordKind::Language => ReorderType::Language,
            RecordKind::Country => ReorderType::Country,
            RecordKind::State => ReorderType::State,
            RecordKind::City => ReorderType::City,
            RecordKind::Origin => ReorderType::Origin,
            RecordKind::Ethnicity => ReorderType::Ethnicity,
            RecordKind::Caste => ReorderType::Caste,
            RecordKind::Sect => ReorderType::Sect,
            RecordKind::Maslak => ReorderType::Maslak,
        }
    }
}

/// Область перестановки: тип + родитель. Для языков страны родитель: страна
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderScope {
    pub reorder_type: ReorderType,
    pub parent_id: Option<String>,
}

impl ReorderScope {
    pub fn for_kind(kind: RecordKind, parent_id: Option<String>) -> Self {
        Self {
            reorder_type: kind.into(),
            parent_id,
        }
    }

    pub fn country_languages(country_id: String) -> Self {
        Self {
            reorder_type: ReorderType::CountryLanguage,
            parent_id: Some(country_id),
        }
    }

    pub fn request(&self, ordered_ids: Vec<String>) -> ReorderRequest {
        let (parent_id, country_id) = match self.reorder_type {
            ReorderType::CountryLanguage => (None, self.parent_id.clone()),
            _ => (self.parent_id.clone(), None),
        };
        ReorderRequest {
            reorder_type: self.reorder_type,
            ordered_ids,
            parent_id,
            country_id,
        }
    }
}

/// POST /api/admin/global-settings/<domain>/reorder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    #[serde(rename = "type")]
    pub reorder_type: ReorderType,
    pub ordered_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
}

impl ReorderRequest {
    pub fn scope(&self) -> ReorderScope {
        let parent_id = match self.reorder_type {
            ReorderType::CountryLanguage => self.country_id.clone(),
            _ => self.parent_id.clone(),
        };
        ReorderScope {
            reorder_type: self.reorder_type,
            parent_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderResponse {
    pub success: bool,
}

/// Проверка на сервере: `ordered_ids`: ровно перестановка текущих соседей области.
/// Id из чужой ветки, дубликаты и пропуски отклоняются целиком
pub fn validate_permutation(current_ids: &[String], ordered_ids: &[String]) -> Result<(), String> {
    let current: HashSet<&str> = current_ids.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(ordered_ids.len());

    for id in ordered_ids {
        if !current.contains(id.as_str()) {
            return Err(format!("Record {} does not belong to this list", id));
        }
        if !seen.insert(id.as_str()) {
            return Err(format!("Record {} is listed twice", id));
        }
    }
    if seen.len() != current.len() {
        return Err(format!(
            "Expected {} records in the new order, got {}",
            current.len(),
            seen.len()
        ));
    }
    Ok(())
}

// ============================================================================
// Local list state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Элемент, который можно переупорядочить
pub trait Orderable {
    fn order_id(&self) -> String;
}

impl Orderable for TaxonomyNode {
    fn order_id(&self) -> String {
        self.id.clone()
    }
}

impl Orderable for CountryLanguage {
    fn order_id(&self) -> String {
        self.language_id.clone()
    }
}

/// Убрать элемент с `from` и вставить на `to`
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    if from >= out.len() || to >= out.len() || from == to {
        return out;
    }
    let item = out.remove(from);
    out.insert(to, item);
    out
}

/// Целевой индекс для сдвига; None на границе
pub fn target_index(len: usize, index: usize, direction: MoveDirection) -> Option<usize> {
    if index >= len {
        return None;
    }
    match direction {
        MoveDirection::Up if index > 0 => Some(index - 1),
        MoveDirection::Down if index + 1 < len => Some(index + 1),
        _ => None,
    }
}

/// Состояние списка с оптимистичной перестановкой и одиночным запросом в полёте
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderState<T> {
    items: Vec<T>,
    reordering: bool,
    error: Option<String>,
    /// Область, из которой пришли текущие элементы
    loaded_scope: Option<ReorderScope>,
}

impl<T> Default for ReorderState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            reordering: false,
            error: None,
            loaded_scope: None,
        }
    }
}

impl<T: Orderable + Clone> ReorderState<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            reordering: false,
            error: None,
            loaded_scope: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_reordering(&self) -> bool {
        self.reordering
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_move(&self, index: usize, direction: MoveDirection) -> bool {
        !self.reordering && target_index(self.items.len(), index, direction).is_some()
    }

    /// Применить сдвиг локально и вернуть новый порядок id для отправки.
    /// None: no-op: граница списка или предыдущая перестановка ещё не завершена
    pub fn begin_move(&mut self, index: usize, direction: MoveDirection) -> Option<Vec<String>> {
        if self.reordering {
            return None;
        }
        let to = target_index(self.items.len(), index, direction)?;
        self.items = move_item(&self.items, index, to);
        self.reordering = true;
        self.error = None;
        Some(self.items.iter().map(Orderable::order_id).collect())
    }

    /// Сервер подтвердил порядок
    pub fn commit_succeeded(&mut self) {
        self.reordering = false;
    }

    /// Сервер отказал: локальный порядок больше не считается верным,
    /// вызывающий обязан перечитать список и передать его в `replace`
    pub fn commit_failed(&mut self, message: String) {
        self.reordering = false;
        self.error = Some(message);
    }

    /// Заменить элементы авторитетным списком с сервера
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Список области `scope` загружен с сервера
    pub fn load_succeeded(&mut self, scope: ReorderScope, items: Vec<T>) {
        self.items = items;
        self.loaded_scope = Some(scope);
    }

    /// Загрузка не удалась. Прежний список той же области остаётся на экране под ошибкой,
    /// список чужой области (другой уровень или родитель) убирается
    pub fn load_failed(&mut self, scope: &ReorderScope) {
        if self.loaded_scope.as_ref() != Some(scope) {
            self.items.clear();
            self.loaded_scope = None;
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str);

    impl Orderable for Item {
        fn order_id(&self) -> String {
            self.0.to_string()
        }
    }

    fn abc() -> Vec<Item> {
        vec![Item("A"), Item("B"), Item("C")]
    }

    #[test]
    fn test_move_up_then_down_is_identity() {
        let original = abc();
        for i in 1..original.len() {
            let mut state = ReorderState::new(original.clone());
            state.begin_move(i, MoveDirection::Up).unwrap();
            state.commit_succeeded();
            state.begin_move(i - 1, MoveDirection::Down).unwrap();
            state.commit_succeeded();
            assert_eq!(state.items(), original.as_slice());
        }
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut state = ReorderState::new(abc());
        assert_eq!(state.begin_move(0, MoveDirection::Up), None);
        assert_eq!(state.begin_move(2, MoveDirection::Down), None);
        assert_eq!(state.items(), abc().as_slice());
        assert!(!state.is_reordering());
    }

    #[test]
    fn test_single_flight_latch() {
        let mut state = ReorderState::new(abc());
        assert!(state.begin_move(1, MoveDirection::Up).is_some());
        assert!(!state.can_move(2, MoveDirection::Up));
        assert_eq!(state.begin_move(2, MoveDirection::Up), None);
        state.commit_succeeded();
        assert!(state.can_move(2, MoveDirection::Up));
    }

    #[test]
    fn test_move_c_up_and_rollback_on_failure() {
        let mut state = ReorderState::new(abc());
        let ids = state.begin_move(2, MoveDirection::Up).unwrap();
        assert_eq!(ids, vec!["A", "C", "B"]);
        assert_eq!(state.items(), &[Item("A"), Item("C"), Item("B")]);

        let request = ReorderScope::for_kind(RecordKind::Country, None).request(ids);
        assert_eq!(request.ordered_ids, vec!["A", "C", "B"]);

        // сервер ответил 500, затем повторный GET вернул исходный порядок
        state.commit_failed("HTTP 500".into());
        assert_eq!(state.error(), Some("HTTP 500"));
        state.replace(abc());
        assert_eq!(state.items(), abc().as_slice());
        assert!(!state.is_reordering());
    }

    #[test]
    fn test_failed_reload_keeps_items_of_same_scope() {
        let states_pk = ReorderScope::for_kind(RecordKind::State, Some("pk".into()));
        let mut state = ReorderState::default();
        state.load_succeeded(states_pk.clone(), abc());

        // повторная загрузка того же списка упала: старые данные остаются
        state.load_failed(&states_pk);
        assert_eq!(state.items(), abc().as_slice());

        // переход к штатам другой страны упал: чужой список не показываем
        let states_in = ReorderScope::for_kind(RecordKind::State, Some("in".into()));
        state.load_failed(&states_in);
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_request_json_shape() {
        let req = ReorderScope::country_languages("pk".into()).request(vec!["ur".into()]);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["type"], "country_language");
        assert_eq!(v["countryId"], "pk");
        assert_eq!(v["orderedIds"], serde_json::json!(["ur"]));
        assert!(v.get("parentId").is_none());
        assert_eq!(req.scope(), ReorderScope::country_languages("pk".into()));
    }

    #[test]
    fn test_validate_permutation() {
        let current: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        assert!(validate_permutation(&current, &["c".into(), "a".into(), "b".into()]).is_ok());
        // id из другой ветки
        assert!(validate_permutation(&current, &["a".into(), "b".into(), "x".into()]).is_err());
        // дубликат
        assert!(validate_permutation(&current, &["a".into(), "a".into(), "b".into()]).is_err());
        // неполный список
        assert!(validate_permutation(&current, &["a".into(), "b".into()]).is_err());
    }

    #[test]
    fn test_move_item_out_of_range_is_identity() {
        assert_eq!(move_item(&abc(), 5, 0), abc());
        assert_eq!(move_item(&abc(), 0, 2), vec![Item("B"), Item("C"), Item("A")]);
    }
}
