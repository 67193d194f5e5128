use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhotoStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PhotoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoStatus::Pending => "PENDING",
            PhotoStatus::Approved => "APPROVED",
            PhotoStatus::Rejected => "REJECTED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(PhotoStatus::Pending),
            "APPROVED" => Some(PhotoStatus::Approved),
            "REJECTED" => Some(PhotoStatus::Rejected),
            _ => None,
        }
    }
}

/// Фото анкеты. Сам файл хранится снаружи, здесь только ссылка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePhoto {
    pub id: String,
    pub url: String,
    pub status: PhotoStatus,
    pub rejection_reason: Option<String>,
    pub is_primary: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoAction {
    Approve,
    Reject,
}

/// PATCH /api/admin/profiles/<id>/photos/<photoId>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoModerationRequest {
    pub action: PhotoAction,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Результат модерации фото: новый статус и сохраняемая причина
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoDecision {
    pub status: PhotoStatus,
    pub reason: Option<String>,
}

impl PhotoModerationRequest {
    /// Решение по фото. Модерируется только PENDING; отказ без причины не принимается
    pub fn decide(&self, current: PhotoStatus) -> Result<PhotoDecision, String> {
        if current != PhotoStatus::Pending {
            return Err(format!("Photo is already {}", current.as_str()));
        }
        match self.action {
            PhotoAction::Approve => Ok(PhotoDecision {
                status: PhotoStatus::Approved,
                reason: None,
            }),
            PhotoAction::Reject => {
                let reason = self
                    .reason
                    .as_deref()
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or_else(|| "Rejection reason is required".to_string())?;
                Ok(PhotoDecision {
                    status: PhotoStatus::Rejected,
                    reason: Some(reason.to_string()),
                })
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub photo: ProfilePhoto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_requires_reason() {
        let req = PhotoModerationRequest {
            action: PhotoAction::Reject,
            reason: Some("   ".into()),
        };
        assert!(req.decide(PhotoStatus::Pending).is_err());

        let req = PhotoModerationRequest {
            action: PhotoAction::Reject,
            reason: Some("Blurry".into()),
        };
        let d = req.decide(PhotoStatus::Pending).unwrap();
        assert_eq!(d.status, PhotoStatus::Rejected);
        assert_eq!(d.reason.as_deref(), Some("Blurry"));
    }

    #[test]
    fn test_only_pending_is_moderated() {
        let req = PhotoModerationRequest {
            action: PhotoAction::Approve,
            reason: None,
        };
        assert_eq!(
            req.decide(PhotoStatus::Pending).unwrap().status,
            PhotoStatus::Approved
        );
        assert!(req.decide(PhotoStatus::Rejected).is_err());
        assert!(req.decide(PhotoStatus::Approved).is_err());
    }
}
