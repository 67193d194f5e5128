use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Верхняя граница смещения: SQL OFFSET знаковый
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Постраничный ответ: `{items, page, limit, total, totalPages}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> PageEnvelope<T> {
    pub fn new(items: Vec<T>, page: u64, limit: u64, total: u64) -> Self {
        let limit = limit.max(1);
        Self {
            items,
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Параметры страницы из query string. Нумерация с 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    /// Номер страницы и размер после приведения к допустимым границам
    pub fn normalized(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, limit)
    }

    /// Смещение для выборки; огромный номер страницы даёт пустую страницу, а не переполнение
    pub fn offset(&self) -> u64 {
        let (page, limit) = self.normalized();
        (page - 1).saturating_mul(limit).min(MAX_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let env: PageEnvelope<u8> = PageEnvelope::new(vec![], 1, 20, 41);
        assert_eq!(env.total_pages, 3);
        assert!(env.has_next());
        assert!(!env.has_prev());

        let empty: PageEnvelope<u8> = PageEnvelope::new(vec![], 1, 20, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next());

        let exact: PageEnvelope<u8> = PageEnvelope::new(vec![], 2, 10, 20);
        assert_eq!(exact.total_pages, 2);
        assert!(!exact.has_next());
    }

    #[test]
    fn test_query_normalization() {
        let q = PageQuery {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(q.normalized(), (1, MAX_PAGE_SIZE));
        let q = PageQuery {
            page: Some(3),
            limit: None,
        };
        assert_eq!(q.offset(), 40);
    }

    #[test]
    fn test_offset_for_huge_page() {
        let q = PageQuery {
            page: Some(u64::MAX),
            limit: Some(MAX_PAGE_SIZE),
        };
        assert_eq!(q.offset(), MAX_OFFSET);
        assert!(i64::try_from(q.offset()).is_ok());

        let env: PageEnvelope<u8> = PageEnvelope::new(vec![], u64::MAX, MAX_PAGE_SIZE, 5);
        assert!(!env.has_next());
        assert!(env.has_prev());
    }

    #[test]
    fn test_envelope_json_shape() {
        let env = PageEnvelope::new(vec![1u8], 1, 20, 1);
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["totalPages"], 1);
        assert_eq!(v["items"], serde_json::json!([1]));
    }
}
