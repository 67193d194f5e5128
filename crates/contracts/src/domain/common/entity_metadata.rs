use serde::{Deserialize, Serialize};

/// Метаданные экземпляра агрегата (lifecycle tracking)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    /// Дата создания записи
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Дата последнего обновления
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Версия, растёт при каждой записи
    pub version: i32,
}

impl EntityMetadata {
    /// Создать новые метаданные для нового агрегата
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Обновить timestamp и версию
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
        self.version += 1;
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
