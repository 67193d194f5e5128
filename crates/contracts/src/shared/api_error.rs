use serde::{Deserialize, Serialize};

/// Тело любого ответа с ошибкой: `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Текст ошибки для показа: сообщение сервера или `HTTP <status>`
    pub fn message_from_body(status: u16, body: &str) -> String {
        match serde_json::from_str::<ApiError>(body) {
            Ok(e) if !e.error.trim().is_empty() => e.error,
            _ => format!("HTTP {}", status),
        }
    }
}

/// Ответ-флаг для операций без данных
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_body() {
        assert_eq!(
            ApiError::message_from_body(409, r#"{"error":"Slug already exists"}"#),
            "Slug already exists"
        );
        assert_eq!(ApiError::message_from_body(500, "<html>"), "HTTP 500");
        assert_eq!(ApiError::message_from_body(502, r#"{"error":""}"#), "HTTP 502");
    }
}
