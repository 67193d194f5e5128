use serde::{Deserialize, Serialize};

pub const STEP_COUNT: u8 = 7;

/// Шаги мастера создания анкеты, порядок фиксирован
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WizardStep {
    BasicInfo = 1,
    OriginBackground = 2,
    Location = 3,
    ReligionFamily = 4,
    Physical = 5,
    EducationCareer = 6,
    BioVisibility = 7,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::BasicInfo,
            WizardStep::OriginBackground,
            WizardStep::Location,
            WizardStep::ReligionFamily,
            WizardStep::Physical,
            WizardStep::EducationCareer,
            WizardStep::BioVisibility,
        ]
    }

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.number() == n)
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Info",
            WizardStep::OriginBackground => "Origin & Background",
            WizardStep::Location => "Location",
            WizardStep::ReligionFamily => "Religion & Family",
            WizardStep::Physical => "Physical Attributes",
            WizardStep::EducationCareer => "Education & Career",
            WizardStep::BioVisibility => "Bio & Visibility",
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(&self) -> Option<WizardStep> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn is_first(&self) -> bool {
        *self == WizardStep::BasicInfo
    }

    pub fn is_last(&self) -> bool {
        *self == WizardStep::BioVisibility
    }

    /// Положение шага в индикаторе относительно текущего
    pub fn progress(&self, current: WizardStep) -> StepProgress {
        match self.cmp(&current) {
            std::cmp::Ordering::Less => StepProgress::Done,
            std::cmp::Ordering::Equal => StepProgress::Active,
            std::cmp::Ordering::Greater => StepProgress::Upcoming,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepProgress {
    Done,
    Active,
    Upcoming,
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n).ok_or_else(|| format!("Unknown wizard step {}", n))
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> u8 {
        step.number()
    }
}

/// Процент заполнения по числу пройденных шагов
pub fn completion_percentage(completed_steps: u8) -> u8 {
    let done = completed_steps.min(STEP_COUNT) as u32;
    (done * 100 / STEP_COUNT as u32) as u8
}

/// Шаг, с которого продолжать после перезагрузки
pub fn resume_step(completion_percentage: u8) -> WizardStep {
    let pct = completion_percentage.min(100) as u32;
    // обратное к completion_percentage с округлением до ближайшего
    let completed = ((pct * STEP_COUNT as u32 + 50) / 100) as u8;
    WizardStep::from_number((completed + 1).min(STEP_COUNT)).unwrap_or(WizardStep::BasicInfo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        assert_eq!(WizardStep::BasicInfo.prev(), None);
        assert_eq!(WizardStep::BasicInfo.next(), Some(WizardStep::OriginBackground));
        assert_eq!(WizardStep::BioVisibility.next(), None);
        assert_eq!(WizardStep::try_from(8u8).ok(), None);
    }

    #[test]
    fn test_resume_is_inverse_of_completion() {
        assert_eq!(resume_step(0), WizardStep::BasicInfo);
        for done in 1..STEP_COUNT {
            let pct = completion_percentage(done);
            assert_eq!(resume_step(pct).number(), done + 1, "pct {}", pct);
        }
        assert_eq!(completion_percentage(7), 100);
        assert_eq!(resume_step(100), WizardStep::BioVisibility);
    }

    #[test]
    fn test_step_indicator_progress() {
        let current = WizardStep::Location;
        assert_eq!(WizardStep::BasicInfo.progress(current), StepProgress::Done);
        assert_eq!(WizardStep::OriginBackground.progress(current), StepProgress::Done);
        assert_eq!(WizardStep::Location.progress(current), StepProgress::Active);
        assert_eq!(WizardStep::BioVisibility.progress(current), StepProgress::Upcoming);
        assert_eq!(
            WizardStep::BasicInfo.progress(WizardStep::BasicInfo),
            StepProgress::Active
        );
    }

    #[test]
    fn test_serde_as_number() {
        assert_eq!(serde_json::to_value(WizardStep::Location).unwrap(), 3);
        let s: WizardStep = serde_json::from_str("6").unwrap();
        assert_eq!(s, WizardStep::EducationCareer);
    }
}
