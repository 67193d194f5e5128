use serde::{Deserialize, Serialize};

/// Статус подтверждения телефона
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    #[default]
    Unverified,
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Unverified => "UNVERIFIED",
            VerificationStatus::Pending => "PENDING",
            VerificationStatus::Verified => "VERIFIED",
            VerificationStatus::Rejected => "REJECTED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "UNVERIFIED" => Some(VerificationStatus::Unverified),
            "PENDING" => Some(VerificationStatus::Pending),
            "VERIFIED" => Some(VerificationStatus::Verified),
            "REJECTED" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }

    /// Пользователь может (повторно) отправить телефон на проверку
    pub fn can_submit(&self) -> bool {
        matches!(
            self,
            VerificationStatus::Unverified | VerificationStatus::Rejected
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub phone_verification: VerificationStatus,
    pub verification_note: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_admin: bool,
}

// ============================================================================
// Verification queue
// ============================================================================

/// Строка очереди подтверждения телефонов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationQueueItem {
    pub user_id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub status: VerificationStatus,
    pub note: Option<String>,
    pub submitted_at: Option<String>,
}

/// GET /api/admin/users/verification?status=&page=&limit=
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VerificationQueueQuery {
    pub status: Option<VerificationStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationAction {
    Approve,
    Reject,
}

/// POST /api/admin/users/verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDecision {
    pub user_id: String,
    pub action: VerificationAction,
    #[serde(default)]
    pub note: Option<String>,
}

impl VerificationDecision {
    /// Решение принимается только по заявке в статусе PENDING
    pub fn resolve(&self, current: VerificationStatus) -> Result<VerificationStatus, String> {
        if current != VerificationStatus::Pending {
            return Err(format!(
                "User verification is {}, not PENDING",
                current.as_str()
            ));
        }
        Ok(match self.action {
            VerificationAction::Approve => VerificationStatus::Verified,
            VerificationAction::Reject => VerificationStatus::Rejected,
        })
    }
}

/// PUT /api/admin/users/verification: вернуть пользователя в очередь
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequeueRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationUpdateResponse {
    pub status: VerificationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_only_from_pending() {
        let d = VerificationDecision {
            user_id: "u1".into(),
            action: VerificationAction::Approve,
            note: None,
        };
        assert_eq!(
            d.resolve(VerificationStatus::Pending),
            Ok(VerificationStatus::Verified)
        );
        assert!(d.resolve(VerificationStatus::Verified).is_err());
        assert!(d.resolve(VerificationStatus::Unverified).is_err());
    }

    #[test]
    fn test_can_submit() {
        assert!(VerificationStatus::Unverified.can_submit());
        assert!(VerificationStatus::Rejected.can_submit());
        assert!(!VerificationStatus::Pending.can_submit());
        assert!(!VerificationStatus::Verified.can_submit());
    }

    #[test]
    fn test_decision_wire_format() {
        let d: VerificationDecision =
            serde_json::from_str(r#"{"userId":"u1","action":"reject","note":"Wrong number"}"#)
                .unwrap();
        assert_eq!(d.action, VerificationAction::Reject);
        assert_eq!(d.note.as_deref(), Some("Wrong number"));
    }
}
