use serde::{Deserialize, Serialize};

use super::moderation::ModerationStatus;
use super::photo::{PhotoStatus, ProfilePhoto};
use crate::domain::a001_taxonomy::node::OriginTerminology;
use crate::domain::common::{AggregateRoot, EntityMetadata};
use crate::system::users::VerificationStatus;

/// Ссылка на запись справочника вместе с подписью
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefLabel {
    pub id: String,
    pub label: String,
}

/// Подпись ссылки или введённое пользователем значение
pub fn ref_or_suggested(r: &Option<RefLabel>, suggested: &Option<String>) -> String {
    match (r, suggested) {
        (Some(r), _) => r.label.clone(),
        (None, Some(s)) if !s.trim().is_empty() => format!("{} (suggested)", s),
        _ => "—".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub display_name: String,
    pub profile_for: String,
    pub gender: String,
    pub date_of_birth: String,
    pub age: Option<u32>,
    pub marital_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    pub country: Option<RefLabel>,
    pub state: Option<RefLabel>,
    pub city: Option<RefLabel>,
    pub suggested_city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OriginInfo {
    pub origin: Option<RefLabel>,
    pub ethnicity: Option<RefLabel>,
    pub caste: Option<RefLabel>,
    pub suggested_caste: Option<String>,
    /// Терминология выбранного Origin (подписи "Tribe"/"Clan" и т.п.)
    pub terminology: OriginTerminology,
    pub mother_tongue: Option<RefLabel>,
    pub suggested_mother_tongue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReligionInfo {
    pub sect: Option<RefLabel>,
    pub maslak: Option<RefLabel>,
    pub religiosity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FamilyInfo {
    pub family_type: String,
    pub father_occupation: String,
    pub siblings: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalInfo {
    pub height_cm: Option<u16>,
    pub body_type: String,
    pub complexion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EducationInfo {
    pub level: Option<RefLabel>,
    pub field: Option<RefLabel>,
    pub occupation: String,
    pub annual_income: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BioInfo {
    pub about: String,
    pub visibility: String,
}

/// Учётная запись владельца анкеты
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub user_id: String,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub phone_verification: VerificationStatus,
    pub is_active: bool,
}

/// Денормализованная анкета для экрана модерации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub id: String,
    pub basic: BasicInfo,
    pub location: LocationInfo,
    pub origin: OriginInfo,
    pub religion: ReligionInfo,
    pub family: FamilyInfo,
    pub physical: PhysicalInfo,
    pub education: EducationInfo,
    pub bio: BioInfo,
    pub photos: Vec<ProfilePhoto>,
    pub account: AccountSummary,
    pub completion_percentage: u8,
    pub moderation_status: ModerationStatus,
    pub moderation_feedback: Option<String>,
    pub metadata: EntityMetadata,
}

impl ProfileSnapshot {
    pub fn pending_photo_count(&self) -> usize {
        self.photos
            .iter()
            .filter(|p| p.status == PhotoStatus::Pending)
            .count()
    }

    /// Есть ли текстовые значения, которые стоит сопоставить со справочником
    pub fn has_suggestions(&self) -> bool {
        [
            &self.location.suggested_city,
            &self.origin.suggested_caste,
            &self.origin.suggested_mother_tongue,
        ]
        .iter()
        .any(|s| s.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false))
    }
}

impl AggregateRoot for ProfileSnapshot {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "profile"
    }

    fn element_name() -> &'static str {
        "Profile"
    }

    fn list_name() -> &'static str {
        "Profiles"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: ProfileSnapshot,
}

/// Строка очереди модерации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileListItem {
    pub id: String,
    pub display_name: String,
    pub username: String,
    pub gender: String,
    pub city: Option<String>,
    pub origin: Option<String>,
    pub completion_percentage: u8,
    pub moderation_status: ModerationStatus,
    pub photo_count: i64,
    pub pending_photo_count: i64,
    pub updated_at: String,
}

/// GET /api/admin/profiles?status=&page=&limit=
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileListQuery {
    pub status: Option<ModerationStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_table_name() {
        assert_eq!(ProfileSnapshot::full_name(), "a002_profile");
    }

    #[test]
    fn test_ref_or_suggested() {
        let r = Some(RefLabel {
            id: "lhr".into(),
            label: "Lahore".into(),
        });
        assert_eq!(ref_or_suggested(&r, &Some("Okara".into())), "Lahore");
        assert_eq!(ref_or_suggested(&None, &Some("Okara".into())), "Okara (suggested)");
        assert_eq!(ref_or_suggested(&None, &None), "—");
    }

    #[test]
    fn test_list_query_status_parsing() {
        let q: ProfileListQuery =
            serde_json::from_str(r#"{"status":"PENDING","page":2}"#).unwrap();
        assert_eq!(q.status, Some(ModerationStatus::Pending));
        assert_eq!(q.page, Some(2));
    }
}
