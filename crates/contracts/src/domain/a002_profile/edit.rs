//! Экран редактирования анкеты администратором:
//! сопоставление текстовых "suggested" значений со справочником

use serde::{Deserialize, Serialize};

use crate::domain::a001_taxonomy::kind::RecordKind;

/// Поле с текстовым предложением пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestedField {
    City,
    Caste,
    MotherTongue,
}

impl SuggestedField {
    pub fn all() -> &'static [SuggestedField] {
        &[
            SuggestedField::City,
            SuggestedField::Caste,
            SuggestedField::MotherTongue,
        ]
    }

    /// Справочник, на который сопоставляется значение
    pub fn target_kind(&self) -> RecordKind {
        match self {
            SuggestedField::City => RecordKind::City,
            SuggestedField::Caste => RecordKind::Caste,
            SuggestedField::MotherTongue => RecordKind::Language,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SuggestedField::City => "City",
            SuggestedField::Caste => "Caste",
            SuggestedField::MotherTongue => "Mother tongue",
        }
    }
}

/// Ссылки анкеты на справочники, которые может менять администратор
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRefs {
    pub country_id: Option<String>,
    pub state_id: Option<String>,
    pub city_id: Option<String>,
    pub origin_id: Option<String>,
    pub ethnicity_id: Option<String>,
    pub caste_id: Option<String>,
    pub mother_tongue_id: Option<String>,
}

fn normalize(id: Option<String>) -> Option<String> {
    id.filter(|s| !s.trim().is_empty())
}

impl ProfileRefs {
    pub fn set_country(&mut self, id: Option<String>) {
        let id = normalize(id);
        if self.country_id != id {
            self.country_id = id;
            self.state_id = None;
            self.city_id = None;
        }
    }

    pub fn set_state(&mut self, id: Option<String>) {
        let id = normalize(id);
        if self.state_id != id {
            self.state_id = id;
            self.city_id = None;
        }
    }

    pub fn set_origin(&mut self, id: Option<String>) {
        let id = normalize(id);
        if self.origin_id != id {
            self.origin_id = id;
            self.ethnicity_id = None;
            self.caste_id = None;
        }
    }

    pub fn set_ethnicity(&mut self, id: Option<String>) {
        let id = normalize(id);
        if self.ethnicity_id != id {
            self.ethnicity_id = id;
            self.caste_id = None;
        }
    }

    pub fn target_id(&self, field: SuggestedField) -> Option<&str> {
        match field {
            SuggestedField::City => self.city_id.as_deref(),
            SuggestedField::Caste => self.caste_id.as_deref(),
            SuggestedField::MotherTongue => self.mother_tongue_id.as_deref(),
        }
    }
}

/// GET /api/admin/profiles/<id>/edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEditData {
    pub profile_id: String,
    pub refs: ProfileRefs,
    pub suggested_city: Option<String>,
    pub suggested_caste: Option<String>,
    pub suggested_mother_tongue: Option<String>,
}

impl ProfileEditData {
    pub fn suggestion(&self, field: SuggestedField) -> Option<&str> {
        match field {
            SuggestedField::City => self.suggested_city.as_deref(),
            SuggestedField::Caste => self.suggested_caste.as_deref(),
            SuggestedField::MotherTongue => self.suggested_mother_tongue.as_deref(),
        }
        .filter(|s| !s.trim().is_empty())
    }
}

/// PATCH /api/admin/profiles/<id>/edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEditRequest {
    pub refs: ProfileRefs,
    /// Какие текстовые предложения стереть после сопоставления
    #[serde(default)]
    pub clear_suggestions: Vec<SuggestedField>,
}

impl ProfileEditRequest {
    /// Стирать предложение можно только когда ссылка уже выбрана
    pub fn validate(&self) -> Result<(), String> {
        for field in &self.clear_suggestions {
            if self.refs.target_id(*field).is_none() {
                return Err(format!(
                    "Select a {} before clearing the suggested value",
                    field.title().to_lowercase()
                ));
            }
        }
        if self.refs.state_id.is_some() && self.refs.country_id.is_none() {
            return Err("State requires a country".into());
        }
        if self.refs.city_id.is_some() && self.refs.state_id.is_none() {
            return Err("City requires a state".into());
        }
        if self.refs.ethnicity_id.is_some() && self.refs.origin_id.is_none() {
            return Err("Ethnicity requires an origin".into());
        }
        if self.refs.caste_id.is_some() && self.refs.ethnicity_id.is_none() {
            return Err("Caste requires an ethnicity".into());
        }
        Ok(())
    }

    pub fn clears(&self, field: SuggestedField) -> bool {
        self.clear_suggestions.contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_requires_mapping() {
        let mut req = ProfileEditRequest {
            refs: ProfileRefs::default(),
            clear_suggestions: vec![SuggestedField::MotherTongue],
        };
        assert!(req.validate().is_err());
        req.refs.mother_tongue_id = Some("saraiki".into());
        assert!(req.validate().is_ok());
        assert!(req.clears(SuggestedField::MotherTongue));
        assert!(!req.clears(SuggestedField::City));
    }

    #[test]
    fn test_refs_cascade() {
        let mut refs = ProfileRefs {
            country_id: Some("pk".into()),
            state_id: Some("punjab".into()),
            city_id: Some("lahore".into()),
            ..Default::default()
        };
        refs.set_state(Some("sindh".into()));
        assert_eq!(refs.city_id, None);
        refs.set_country(Some("in".into()));
        assert_eq!(refs.state_id, None);

        let req = ProfileEditRequest {
            refs: ProfileRefs {
                city_id: Some("x".into()),
                ..Default::default()
            },
            clear_suggestions: vec![],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_target_kinds() {
        assert_eq!(SuggestedField::MotherTongue.target_kind(), RecordKind::Language);
        assert_eq!(SuggestedField::Caste.target_kind(), RecordKind::Caste);
    }
}
