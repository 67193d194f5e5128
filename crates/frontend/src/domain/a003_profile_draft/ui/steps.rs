use contracts::domain::a001_taxonomy::kind::RecordKind;
use contracts::domain::a003_profile_draft::{ProfileDraft, WizardStep};
use leptos::prelude::*;

use super::fields::{choice_field, date_field, lookup_field, number_field, text_area, text_field};

const PROFILE_FOR: &[(&str, &str)] = &[
    ("self", "Myself"),
    ("son", "Son"),
    ("daughter", "Daughter"),
    ("brother", "Brother"),
    ("sister", "Sister"),
    ("relative", "Relative"),
    ("friend", "Friend"),
];

const GENDER: &[(&str, &str)] = &[("male", "Male"), ("female", "Female")];

const MARITAL_STATUS: &[(&str, &str)] = &[
    ("never_married", "Never married"),
    ("divorced", "Divorced"),
    ("widowed", "Widowed"),
    ("separated", "Separated"),
];

const RELIGIOSITY: &[(&str, &str)] = &[
    ("very_religious", "Very religious"),
    ("religious", "Religious"),
    ("moderate", "Moderate"),
    ("liberal", "Liberal"),
];

const FAMILY_TYPE: &[(&str, &str)] = &[("nuclear", "Nuclear"), ("joint", "Joint")];

const BODY_TYPE: &[(&str, &str)] = &[
    ("slim", "Slim"),
    ("average", "Average"),
    ("athletic", "Athletic"),
    ("heavy", "Heavy"),
];

const COMPLEXION: &[(&str, &str)] = &[
    ("fair", "Fair"),
    ("wheatish", "Wheatish"),
    ("medium", "Medium"),
    ("dark", "Dark"),
];

const VISIBILITY: &[(&str, &str)] = &[
    ("public", "Everyone"),
    ("members", "Registered members"),
    ("hidden", "Hidden"),
];

/// Поля одного шага мастера
pub fn step_fields(step: WizardStep, draft: RwSignal<ProfileDraft>) -> AnyView {
    match step {
        WizardStep::BasicInfo => view! {
            {choice_field(draft, "Profile created for", true, PROFILE_FOR, |d| d.profile_for.clone(), |d, v| d.profile_for = v)}
            {choice_field(draft, "Gender", true, GENDER, |d| d.gender.clone(), |d, v| d.gender = v)}
            {date_field(draft, "Date of birth", |d| d.date_of_birth.clone(), |d, v| d.date_of_birth = v)}
            {choice_field(draft, "Marital status", true, MARITAL_STATUS, |d| d.marital_status.clone(), |d, v| d.marital_status = v)}
            {text_field(draft, "Display name", false, |d| d.display_name.clone(), |d, v| d.display_name = v)}
        }
        .into_any(),

        WizardStep::OriginBackground => view! {
            {lookup_field(draft, RecordKind::Origin, "Origin", true,
                |d| d.origin_id.clone(), None, |d, v| d.set_origin(v))}
            {lookup_field(draft, RecordKind::Ethnicity, "Ethnicity", false,
                |d| d.ethnicity_id.clone(), Some(|d: &ProfileDraft| d.origin_id.clone()), |d, v| d.set_ethnicity(v))}
            {lookup_field(draft, RecordKind::Caste, "Caste", false,
                |d| d.caste_id.clone(), Some(|d: &ProfileDraft| d.ethnicity_id.clone()), |d, v| d.set_caste(v))}
            {text_field(draft, "Caste not listed? Type it", false, |d| d.suggested_caste.clone(), |d, v| d.suggested_caste = v)}
            {lookup_field(draft, RecordKind::Language, "Mother tongue", true,
                |d| d.mother_tongue_id.clone(), None, |d, v| d.mother_tongue_id = v)}
            {text_field(draft, "Mother tongue not listed? Type it", false, |d| d.suggested_mother_tongue.clone(), |d, v| d.suggested_mother_tongue = v)}
        }
        .into_any(),

        WizardStep::Location => view! {
            {lookup_field(draft, RecordKind::Country, "Country", true,
                |d| d.country_id.clone(), None, |d, v| d.set_country(v))}
            {lookup_field(draft, RecordKind::State, "State / province", true,
                |d| d.state_id.clone(), Some(|d: &ProfileDraft| d.country_id.clone()), |d, v| d.set_state(v))}
            {lookup_field(draft, RecordKind::City, "City", true,
                |d| d.city_id.clone(), Some(|d: &ProfileDraft| d.state_id.clone()), |d, v| d.set_city(v))}
            {text_field(draft, "City not listed? Type it", false, |d| d.suggested_city.clone(), |d, v| d.suggested_city = v)}
        }
        .into_any(),

        WizardStep::ReligionFamily => view! {
            {lookup_field(draft, RecordKind::Sect, "Sect", true,
                |d| d.sect_id.clone(), None, |d, v| d.set_sect(v))}
            {lookup_field(draft, RecordKind::Maslak, "Maslak", false,
                |d| d.maslak_id.clone(), Some(|d: &ProfileDraft| d.sect_id.clone()), |d, v| d.maslak_id = v)}
            {choice_field(draft, "Religiosity", true, RELIGIOSITY, |d| d.religiosity.clone(), |d, v| d.religiosity = v)}
            {choice_field(draft, "Family type", false, FAMILY_TYPE, |d| d.family_type.clone(), |d, v| d.family_type = v)}
            {text_field(draft, "Father's occupation", false, |d| d.father_occupation.clone(), |d, v| d.father_occupation = v)}
            {number_field::<u8>(draft, "Siblings", false, |d| d.siblings, |d, v| d.siblings = v)}
        }
        .into_any(),

        WizardStep::Physical => view! {
            {number_field::<u16>(draft, "Height (cm)", true, |d| d.height_cm, |d, v| d.height_cm = v)}
            {choice_field(draft, "Body type", true, BODY_TYPE, |d| d.body_type.clone(), |d, v| d.body_type = v)}
            {choice_field(draft, "Complexion", false, COMPLEXION, |d| d.complexion.clone(), |d, v| d.complexion = v)}
        }
        .into_any(),

        WizardStep::EducationCareer => view! {
            {lookup_field(draft, RecordKind::Level, "Education level", true,
                |d| d.education_level_id.clone(), None, |d, v| d.education_level_id = v)}
            {lookup_field(draft, RecordKind::Field, "Field of study", false,
                |d| d.education_field_id.clone(), None, |d, v| d.education_field_id = v)}
            {text_field(draft, "Occupation", true, |d| d.occupation.clone(), |d, v| d.occupation = v)}
            {text_field(draft, "Annual income", false, |d| d.annual_income.clone(), |d, v| d.annual_income = v)}
        }
        .into_any(),

        WizardStep::BioVisibility => view! {
            {text_area(draft, "About", true, |d| d.about.clone(), |d, v| d.about = v)}
            {choice_field(draft, "Profile visibility", true, VISIBILITY, |d| d.visibility.clone(), |d, v| d.visibility = v)}
        }
        .into_any(),
    }
}
