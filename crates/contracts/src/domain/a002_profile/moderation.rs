use serde::{Deserialize, Serialize};

/// Статус модерации анкеты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Banned,
}

impl ModerationStatus {
    pub fn all() -> &'static [ModerationStatus] {
        &[
            ModerationStatus::Pending,
            ModerationStatus::Approved,
            ModerationStatus::Rejected,
            ModerationStatus::Banned,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "PENDING",
            ModerationStatus::Approved => "APPROVED",
            ModerationStatus::Rejected => "REJECTED",
            ModerationStatus::Banned => "BANNED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|st| st.as_str() == s)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "Pending",
            ModerationStatus::Approved => "Approved",
            ModerationStatus::Rejected => "Rejected",
            ModerationStatus::Banned => "Banned",
        }
    }

    /// Допустимые действия из текущего статуса
    pub fn allowed_actions(&self) -> &'static [ModerationAction] {
        match self {
            ModerationStatus::Pending => &[
                ModerationAction::Approve,
                ModerationAction::Reject,
                ModerationAction::Ban,
            ],
            ModerationStatus::Approved => &[ModerationAction::Ban],
            ModerationStatus::Rejected | ModerationStatus::Banned => &[],
        }
    }

    /// Владелец может менять анкету, пока её не заблокировали
    pub fn owner_can_edit(&self) -> bool {
        !matches!(self, ModerationStatus::Banned)
    }

    /// Переход по действию администратора
    pub fn apply(&self, action: ModerationAction) -> Result<ModerationStatus, String> {
        if self.allowed_actions().contains(&action) {
            Ok(action.target_status())
        } else {
            Err(format!(
                "Cannot {} a profile in status {}",
                action.verb(),
                self.as_str()
            ))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
    Ban,
}

impl ModerationAction {
    pub fn target_status(&self) -> ModerationStatus {
        match self {
            ModerationAction::Approve => ModerationStatus::Approved,
            ModerationAction::Reject => ModerationStatus::Rejected,
            ModerationAction::Ban => ModerationStatus::Banned,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
            ModerationAction::Ban => "ban",
        }
    }
}

/// POST /api/admin/profiles/<id>/moderate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerateRequest {
    pub action: ModerationAction,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl ModerateRequest {
    /// Пустой отзыв не сохраняем
    pub fn normalized_feedback(&self) -> Option<String> {
        self.feedback
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateResponse {
    pub status: ModerationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        let s = ModerationStatus::Pending;
        assert_eq!(s.apply(ModerationAction::Approve), Ok(ModerationStatus::Approved));
        assert_eq!(s.apply(ModerationAction::Reject), Ok(ModerationStatus::Rejected));
        assert_eq!(s.apply(ModerationAction::Ban), Ok(ModerationStatus::Banned));
    }

    #[test]
    fn test_approved_can_only_be_banned() {
        let s = ModerationStatus::Approved;
        assert_eq!(s.apply(ModerationAction::Ban), Ok(ModerationStatus::Banned));
        assert!(s.apply(ModerationAction::Approve).is_err());
        assert!(s.apply(ModerationAction::Reject).is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        for s in [ModerationStatus::Rejected, ModerationStatus::Banned] {
            for a in [
                ModerationAction::Approve,
                ModerationAction::Reject,
                ModerationAction::Ban,
            ] {
                assert!(s.apply(a).is_err());
            }
        }
    }

    #[test]
    fn test_only_banned_locks_owner_edits() {
        assert!(ModerationStatus::Pending.owner_can_edit());
        assert!(ModerationStatus::Approved.owner_can_edit());
        assert!(ModerationStatus::Rejected.owner_can_edit());
        assert!(!ModerationStatus::Banned.owner_can_edit());
    }

    #[test]
    fn test_wire_format() {
        let req: ModerateRequest =
            serde_json::from_str(r#"{"action":"reject","feedback":"  "}"#).unwrap();
        assert_eq!(req.action, ModerationAction::Reject);
        assert_eq!(req.normalized_feedback(), None);
        assert_eq!(
            serde_json::to_value(ModerationStatus::Banned).unwrap(),
            serde_json::json!("BANNED")
        );
        assert_eq!(ModerationStatus::from_str("APPROVED"), Some(ModerationStatus::Approved));
    }
}
