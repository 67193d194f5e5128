//! Универсальный lookup справочников для мастера и редактора анкет

use serde::{Deserialize, Serialize};

use super::a001_taxonomy::kind::RecordKind;

/// GET /api/lookup?table=<kind>&parentId=<id>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupQuery {
    pub table: String,
    pub parent_id: Option<String>,
}

impl LookupQuery {
    pub fn new(kind: RecordKind, parent_id: Option<&str>) -> Self {
        Self {
            table: kind.key().to_string(),
            parent_id: parent_id.map(str::to_string),
        }
    }

    pub fn kind(&self) -> Result<RecordKind, String> {
        RecordKind::from_key(&self.table).ok_or_else(|| format!("Unknown lookup table '{}'", self.table))
    }

    /// Строка запроса без ведущего `?`
    pub fn to_query_string(&self) -> String {
        match &self.parent_id {
            Some(p) => format!("table={}&parentId={}", self.table, p),
            None => format!("table={}", self.table),
        }
    }
}

/// Элемент выпадающего списка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupItem {
    pub id: String,
    pub slug: String,
    pub label: String,
    pub native_label: Option<String>,
    #[serde(default)]
    pub is_popular: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub items: Vec<LookupItem>,
}

/// PATCH /api/lookup?table=<kind>: быстрое переключение флагов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupFlagUpdate {
    pub id: String,
    pub is_active: Option<bool>,
    pub is_popular: Option<bool>,
}

impl LookupFlagUpdate {
    pub fn validate(&self, kind: RecordKind) -> Result<(), String> {
        if self.is_active.is_none() && self.is_popular.is_none() {
            return Err("Nothing to update".into());
        }
        if self.is_popular.is_some() && !kind.supports_popular() {
            return Err(format!("{} has no popular flag", kind.plural()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string() {
        let q = LookupQuery::new(RecordKind::State, Some("pk"));
        assert_eq!(q.to_query_string(), "table=state&parentId=pk");
        assert_eq!(q.kind(), Ok(RecordKind::State));
        let bad = LookupQuery {
            table: "users".into(),
            parent_id: None,
        };
        assert!(bad.kind().is_err());
    }

    #[test]
    fn test_flag_update_validation() {
        let upd = LookupFlagUpdate {
            id: "1".into(),
            is_active: None,
            is_popular: Some(true),
        };
        assert!(upd.validate(RecordKind::City).is_ok());
        assert!(upd.validate(RecordKind::Country).is_err());
        let empty = LookupFlagUpdate {
            id: "1".into(),
            is_active: None,
            is_popular: None,
        };
        assert!(empty.validate(RecordKind::City).is_err());
    }
}
