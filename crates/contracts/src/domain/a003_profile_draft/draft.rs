use serde::{Deserialize, Serialize};

use super::step::{completion_percentage, WizardStep, STEP_COUNT};
use crate::domain::a002_profile::moderation::ModerationStatus;

/// Черновик анкеты: полный снимок формы мастера
///
/// Ссылки на справочники хранятся как id; для значений, которых нет
/// в справочнике, пользователь вводит `suggested*` текстом.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    // 1. Basic info
    pub profile_for: String,
    pub gender: String,
    /// YYYY-MM-DD
    pub date_of_birth: String,
    pub marital_status: String,
    pub display_name: String,

    // 2. Origin & background
    pub origin_id: Option<String>,
    pub ethnicity_id: Option<String>,
    pub caste_id: Option<String>,
    pub suggested_caste: String,
    pub mother_tongue_id: Option<String>,
    pub suggested_mother_tongue: String,

    // 3. Location
    pub country_id: Option<String>,
    pub state_id: Option<String>,
    pub city_id: Option<String>,
    pub suggested_city: String,

    // 4. Religion & family
    pub sect_id: Option<String>,
    pub maslak_id: Option<String>,
    pub religiosity: String,
    pub family_type: String,
    pub father_occupation: String,
    pub siblings: Option<u8>,

    // 5. Physical
    pub height_cm: Option<u16>,
    pub body_type: String,
    pub complexion: String,

    // 6. Education & career
    pub education_level_id: Option<String>,
    pub education_field_id: Option<String>,
    pub occupation: String,
    pub annual_income: String,

    // 7. Bio & visibility
    pub about: String,
    pub visibility: String,
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn blank_id(id: &Option<String>) -> bool {
    id.as_deref().map(blank).unwrap_or(true)
}

/// Нормализация выбора из select: пустая строка = ничего не выбрано
fn normalize_id(id: Option<String>) -> Option<String> {
    id.filter(|s| !blank(s))
}

impl ProfileDraft {
    // ------------------------------------------------------------------------
    // Каскадные селекты: смена родителя сбрасывает зависимые значения
    // ------------------------------------------------------------------------

    pub fn set_origin(&mut self, id: Option<String>) {
        let id = normalize_id(id);
        if self.origin_id != id {
            self.origin_id = id;
            self.ethnicity_id = None;
            self.caste_id = None;
            self.suggested_caste.clear();
        }
    }

    pub fn set_ethnicity(&mut self, id: Option<String>) {
        let id = normalize_id(id);
        if self.ethnicity_id != id {
            self.ethnicity_id = id;
            self.caste_id = None;
        }
    }

    pub fn set_caste(&mut self, id: Option<String>) {
        self.caste_id = normalize_id(id);
    }

    pub fn set_country(&mut self, id: Option<String>) {
        let id = normalize_id(id);
        if self.country_id != id {
            self.country_id = id;
            self.state_id = None;
            self.city_id = None;
            self.suggested_city.clear();
        }
    }

    pub fn set_state(&mut self, id: Option<String>) {
        let id = normalize_id(id);
        if self.state_id != id {
            self.state_id = id;
            self.city_id = None;
        }
    }

    pub fn set_city(&mut self, id: Option<String>) {
        self.city_id = normalize_id(id);
    }

    pub fn set_sect(&mut self, id: Option<String>) {
        let id = normalize_id(id);
        if self.sect_id != id {
            self.sect_id = id;
            self.maslak_id = None;
        }
    }

    // ------------------------------------------------------------------------
    // Проверка шагов
    // ------------------------------------------------------------------------

    /// Незаполненные обязательные поля шага (имена полей в JSON)
    pub fn missing_fields(&self, step: WizardStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let mut need = |empty: bool, name: &'static str| {
            if empty {
                missing.push(name);
            }
        };
        match step {
            WizardStep::BasicInfo => {
                need(blank(&self.profile_for), "profileFor");
                need(blank(&self.gender), "gender");
                need(blank(&self.date_of_birth), "dateOfBirth");
                need(blank(&self.marital_status), "maritalStatus");
            }
            WizardStep::OriginBackground => {
                need(blank_id(&self.origin_id), "originId");
                need(
                    blank_id(&self.mother_tongue_id) && blank(&self.suggested_mother_tongue),
                    "motherTongueId",
                );
            }
            WizardStep::Location => {
                need(blank_id(&self.country_id), "countryId");
                need(blank_id(&self.state_id), "stateId");
                need(
                    blank_id(&self.city_id) && blank(&self.suggested_city),
                    "cityId",
                );
            }
            WizardStep::ReligionFamily => {
                need(blank_id(&self.sect_id), "sectId");
                need(blank(&self.religiosity), "religiosity");
            }
            WizardStep::Physical => {
                need(self.height_cm.is_none(), "heightCm");
                need(blank(&self.body_type), "bodyType");
            }
            WizardStep::EducationCareer => {
                need(blank_id(&self.education_level_id), "educationLevelId");
                need(blank(&self.occupation), "occupation");
            }
            WizardStep::BioVisibility => {
                need(blank(&self.about), "about");
                need(blank(&self.visibility), "visibility");
            }
        }
        missing
    }

    /// Кнопка "Continue" активна только при заполненных полях шага
    pub fn can_continue(&self, step: WizardStep) -> bool {
        self.missing_fields(step).is_empty()
    }

    /// Число подряд пройденных шагов начиная с первого
    pub fn completed_steps(&self) -> u8 {
        WizardStep::all()
            .iter()
            .take_while(|s| self.can_continue(**s))
            .count() as u8
    }

    pub fn completion_percentage(&self) -> u8 {
        completion_percentage(self.completed_steps())
    }

    pub fn next_step(&self) -> WizardStep {
        WizardStep::from_number((self.completed_steps() + 1).min(STEP_COUNT))
            .unwrap_or(WizardStep::BasicInfo)
    }

    /// Проверка на сервере: текущий шаг и все предыдущие должны быть заполнены
    pub fn validate_through(&self, step: WizardStep) -> Result<(), String> {
        for s in WizardStep::all().iter().filter(|s| **s <= step) {
            let missing = self.missing_fields(*s);
            if !missing.is_empty() {
                return Err(format!(
                    "Step {} ({}) is incomplete: {}",
                    s.number(),
                    s.title(),
                    missing.join(", ")
                ));
            }
        }
        Ok(())
    }
}

/// PATCH /api/profile: `{step, ...draft}`. POST шага 1 несёт тот же формат
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStepRequest {
    pub step: WizardStep,
    #[serde(flatten)]
    pub draft: ProfileDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStepResponse {
    pub profile_id: String,
    pub completion_percentage: u8,
    pub next_step: WizardStep,
}

/// GET /api/profile: собственная анкета пользователя (если уже создана)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyProfileResponse {
    pub profile_id: Option<String>,
    pub draft: ProfileDraft,
    pub completion_percentage: u8,
    pub moderation_status: Option<ModerationStatus>,
    pub moderation_feedback: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMethod {
    Post,
    Patch,
}

/// Шаг 1 без анкеты создаёт её (POST), всё остальное: PATCH
pub fn save_method(step: WizardStep, profile_exists: bool) -> SaveMethod {
    if step.is_first() && !profile_exists {
        SaveMethod::Post
    } else {
        SaveMethod::Patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_profile_draft::step::resume_step;

    fn filled() -> ProfileDraft {
        ProfileDraft {
            profile_for: "self".into(),
            gender: "female".into(),
            date_of_birth: "1995-04-12".into(),
            marital_status: "never_married".into(),
            origin_id: Some("punjabi".into()),
            ethnicity_id: Some("jat".into()),
            caste_id: Some("sandhu".into()),
            mother_tongue_id: Some("punjabi-lang".into()),
            country_id: Some("pk".into()),
            state_id: Some("punjab".into()),
            city_id: Some("lahore".into()),
            sect_id: Some("sunni".into()),
            maslak_id: Some("hanafi".into()),
            religiosity: "practicing".into(),
            height_cm: Some(165),
            body_type: "slim".into(),
            education_level_id: Some("masters".into()),
            occupation: "Engineer".into(),
            about: "Hello".into(),
            visibility: "members".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_origin_change_clears_children_in_payload() {
        let mut d = filled();
        d.set_origin(Some("pashtun".into()));
        assert_eq!(d.ethnicity_id, None);
        assert_eq!(d.caste_id, None);

        let req = SaveStepRequest {
            step: WizardStep::OriginBackground,
            draft: d,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["step"], 2);
        assert_eq!(v["originId"], "pashtun");
        assert!(v["ethnicityId"].is_null());
        assert!(v["casteId"].is_null());
    }

    #[test]
    fn test_same_parent_keeps_children() {
        let mut d = filled();
        d.set_origin(Some("punjabi".into()));
        assert_eq!(d.ethnicity_id.as_deref(), Some("jat"));
        d.set_state(Some("sindh".into()));
        assert_eq!(d.city_id, None);
        assert_eq!(d.country_id.as_deref(), Some("pk"));
        d.set_sect(Some("shia".into()));
        assert_eq!(d.maslak_id, None);
        d.set_ethnicity(Some("arain".into()));
        assert_eq!(d.caste_id, None);
    }

    #[test]
    fn test_step_gating() {
        let mut d = ProfileDraft::default();
        assert_eq!(
            d.missing_fields(WizardStep::BasicInfo),
            vec!["profileFor", "gender", "dateOfBirth", "maritalStatus"]
        );
        d.origin_id = Some("punjabi".into());
        assert_eq!(d.missing_fields(WizardStep::OriginBackground), vec!["motherTongueId"]);
        d.suggested_mother_tongue = "Saraiki".into();
        assert!(d.can_continue(WizardStep::OriginBackground));

        d.country_id = Some("pk".into());
        d.state_id = Some("punjab".into());
        assert!(!d.can_continue(WizardStep::Location));
        d.suggested_city = "Okara".into();
        assert!(d.can_continue(WizardStep::Location));
    }

    #[test]
    fn test_completion_and_resume() {
        let mut d = filled();
        assert_eq!(d.completed_steps(), 7);
        assert_eq!(d.completion_percentage(), 100);

        d.religiosity.clear();
        assert_eq!(d.completed_steps(), 3);
        assert_eq!(d.next_step(), WizardStep::ReligionFamily);
        assert_eq!(resume_step(d.completion_percentage()), WizardStep::ReligionFamily);
        assert!(d.validate_through(WizardStep::Location).is_ok());
        assert!(d.validate_through(WizardStep::Physical).is_err());
    }

    #[test]
    fn test_save_method() {
        assert_eq!(save_method(WizardStep::BasicInfo, false), SaveMethod::Post);
        assert_eq!(save_method(WizardStep::BasicInfo, true), SaveMethod::Patch);
        assert_eq!(save_method(WizardStep::Location, true), SaveMethod::Patch);
    }

    #[test]
    fn test_empty_select_value_is_none() {
        let mut d = filled();
        d.set_country(Some("".into()));
        assert_eq!(d.country_id, None);
        assert_eq!(d.state_id, None);
    }
}
