use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use contracts::domain::a001_taxonomy::kind::RecordKind;
use contracts::domain::a001_taxonomy::node::OriginTerminology;
use contracts::domain::a002_profile::edit::{ProfileEditData, ProfileEditRequest, SuggestedField};
use contracts::domain::a002_profile::moderation::{ModerateRequest, ModerationStatus};
use contracts::domain::a002_profile::photo::{PhotoModerationRequest, ProfilePhoto};
use contracts::domain::a002_profile::snapshot::{
    AccountSummary, BasicInfo, BioInfo, EducationInfo, FamilyInfo, LocationInfo, OriginInfo,
    PhysicalInfo, ProfileListItem, ProfileListQuery, ProfileSnapshot, RefLabel, ReligionInfo,
};
use contracts::domain::common::EntityMetadata;
use contracts::shared::paging::{PageEnvelope, PageQuery};

use super::photo_repository;
use super::repository::{self, Model};
use crate::domain::a001_taxonomy::{repository as taxonomy_repository, service as taxonomy_service};
use crate::shared::error::AppError;
use crate::system::users::repository as user_repository;

/// Полных лет на дату `today`. Некорректная дата даёт `None`
pub fn age_on(date_of_birth: &str, today: NaiveDate) -> Option<u32> {
    let dob = NaiveDate::parse_from_str(date_of_birth.trim(), "%Y-%m-%d").ok()?;
    if dob > today {
        return None;
    }
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

async fn require(id: &str) -> Result<Model> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile not found").into())
}

async fn ref_label(id: &Option<String>) -> Result<Option<RefLabel>> {
    let Some(id) = id else {
        return Ok(None);
    };
    Ok(taxonomy_repository::get_by_id(id).await?.map(|m| RefLabel {
        id: m.id,
        label: m.label,
    }))
}

pub async fn list(query: ProfileListQuery) -> Result<PageEnvelope<ProfileListItem>> {
    let paging = PageQuery {
        page: query.page,
        limit: query.limit,
    };
    let (page, limit) = paging.normalized();
    let total = repository::count_by_status(query.status).await?;
    let items = repository::list_page(query.status, paging.offset(), limit).await?;
    Ok(PageEnvelope::new(items, page, limit, total))
}

/// Денормализованная анкета: подписи справочников, фото и учётная запись
pub async fn snapshot(id: &str) -> Result<ProfileSnapshot> {
    let m = require(id).await?;

    let origin_model = match &m.origin_id {
        Some(origin_id) => taxonomy_repository::get_by_id(origin_id).await?,
        None => None,
    };
    let terminology = origin_model
        .as_ref()
        .and_then(|o| o.origin_settings())
        .map(|s| s.terminology)
        .unwrap_or_else(OriginTerminology::default);

    let user = user_repository::get_by_id(&m.user_id).await?;
    let account = match user {
        Some(u) => AccountSummary {
            user_id: u.id,
            username: u.username,
            email: u.email,
            phone: u.phone,
            phone_verification: u.phone_verification,
            is_active: u.is_active,
        },
        None => AccountSummary {
            user_id: m.user_id.clone(),
            username: String::new(),
            email: None,
            phone: None,
            phone_verification: Default::default(),
            is_active: false,
        },
    };

    let photos = photo_repository::list_for_profile(&m.id).await?;
    let draft = m.to_draft();

    Ok(ProfileSnapshot {
        id: m.id.clone(),
        basic: BasicInfo {
            display_name: draft.display_name.clone(),
            profile_for: draft.profile_for.clone(),
            gender: draft.gender.clone(),
            age: age_on(&draft.date_of_birth, Utc::now().date_naive()),
            date_of_birth: draft.date_of_birth.clone(),
            marital_status: draft.marital_status.clone(),
        },
        location: LocationInfo {
            country: ref_label(&m.country_id).await?,
            state: ref_label(&m.state_id).await?,
            city: ref_label(&m.city_id).await?,
            suggested_city: m.suggested_city.clone(),
        },
        origin: OriginInfo {
            origin: origin_model.map(|o| RefLabel {
                id: o.id,
                label: o.label,
            }),
            ethnicity: ref_label(&m.ethnicity_id).await?,
            caste: ref_label(&m.caste_id).await?,
            suggested_caste: m.suggested_caste.clone(),
            terminology,
            mother_tongue: ref_label(&m.mother_tongue_id).await?,
            suggested_mother_tongue: m.suggested_mother_tongue.clone(),
        },
        religion: ReligionInfo {
            sect: ref_label(&m.sect_id).await?,
            maslak: ref_label(&m.maslak_id).await?,
            religiosity: draft.religiosity.clone(),
        },
        family: FamilyInfo {
            family_type: draft.family_type.clone(),
            father_occupation: draft.father_occupation.clone(),
            siblings: draft.siblings,
        },
        physical: PhysicalInfo {
            height_cm: draft.height_cm,
            body_type: draft.body_type.clone(),
            complexion: draft.complexion.clone(),
        },
        education: EducationInfo {
            level: ref_label(&m.education_level_id).await?,
            field: ref_label(&m.education_field_id).await?,
            occupation: draft.occupation.clone(),
            annual_income: draft.annual_income.clone(),
        },
        bio: BioInfo {
            about: draft.about.clone(),
            visibility: draft.visibility.clone(),
        },
        photos,
        account,
        completion_percentage: m.completion_percentage.clamp(0, 100) as u8,
        moderation_status: m.status(),
        moderation_feedback: m.moderation_feedback.clone(),
        metadata: EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            version: m.version,
        },
    })
}

pub async fn moderate(id: &str, request: ModerateRequest) -> Result<ModerationStatus> {
    let m = require(id).await?;
    let current = m.status();
    let next = current.apply(request.action).map_err(AppError::Validation)?;
    repository::set_moderation(&m.id, next, request.normalized_feedback()).await?;
    tracing::info!(
        "Profile {} {}: {} -> {}",
        m.id,
        request.action.verb(),
        current.as_str(),
        next.as_str()
    );
    Ok(next)
}

pub async fn moderate_photo(
    profile_id: &str,
    photo_id: &str,
    request: PhotoModerationRequest,
) -> Result<ProfilePhoto> {
    require(profile_id).await?;
    let photo = photo_repository::get(profile_id, photo_id)
        .await?
        .ok_or_else(|| AppError::not_found("Photo not found"))?;
    let current = contracts::domain::a002_profile::photo::PhotoStatus::from_str(&photo.status)
        .unwrap_or_default();
    let decision = request.decide(current).map_err(AppError::Validation)?;
    photo_repository::set_status(photo, decision.status, decision.reason).await
}

/// Фото удаляется в любом статусе
pub async fn delete_photo(profile_id: &str, photo_id: &str) -> Result<()> {
    require(profile_id).await?;
    if photo_repository::get(profile_id, photo_id).await?.is_none() {
        return Err(AppError::not_found("Photo not found").into());
    }
    photo_repository::delete(photo_id).await?;
    tracing::info!("Photo {} of profile {} deleted", photo_id, profile_id);
    Ok(())
}

fn edit_data(m: &Model) -> ProfileEditData {
    ProfileEditData {
        profile_id: m.id.clone(),
        refs: m.refs(),
        suggested_city: m.suggested_city.clone(),
        suggested_caste: m.suggested_caste.clone(),
        suggested_mother_tongue: m.suggested_mother_tongue.clone(),
    }
}

pub async fn get_edit(id: &str) -> Result<ProfileEditData> {
    Ok(edit_data(&require(id).await?))
}

/// Сопоставление текстовых значений со справочником и, по желанию, их удаление
pub async fn update_edit(id: &str, request: ProfileEditRequest) -> Result<ProfileEditData> {
    request.validate().map_err(AppError::Validation)?;
    let mut m = require(id).await?;
    let refs = &request.refs;

    taxonomy_service::check_chain(&[
        (RecordKind::Country, refs.country_id.as_deref()),
        (RecordKind::State, refs.state_id.as_deref()),
        (RecordKind::City, refs.city_id.as_deref()),
    ])
    .await?;
    taxonomy_service::check_chain(&[
        (RecordKind::Origin, refs.origin_id.as_deref()),
        (RecordKind::Ethnicity, refs.ethnicity_id.as_deref()),
        (RecordKind::Caste, refs.caste_id.as_deref()),
    ])
    .await?;
    taxonomy_service::check_chain(&[(RecordKind::Language, refs.mother_tongue_id.as_deref())])
        .await?;

    m.apply_refs(refs);
    for field in SuggestedField::all() {
        if request.clears(*field) {
            match field {
                SuggestedField::City => m.suggested_city = None,
                SuggestedField::Caste => m.suggested_caste = None,
                SuggestedField::MotherTongue => m.suggested_mother_tongue = None,
            }
        }
    }

    let saved = repository::save(m).await?;
    tracing::info!("Profile {} references remapped", saved.id);
    Ok(edit_data(&saved))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        assert_eq!(age_on("1995-06-15", day("2025-06-14")), Some(29));
        assert_eq!(age_on("1995-06-15", day("2025-06-15")), Some(30));
        assert_eq!(age_on("2000-02-29", day("2025-02-28")), Some(24));
    }

    #[test]
    fn test_age_invalid_input() {
        assert_eq!(age_on("", day("2025-01-01")), None);
        assert_eq!(age_on("15/06/1995", day("2025-01-01")), None);
        assert_eq!(age_on("2030-01-01", day("2025-01-01")), None);
    }

    #[test]
    fn test_edit_data_exposes_suggestions() {
        let mut m = Model::new_for_user("u1");
        m.suggested_city = Some("Okara".into());
        m.city_id = None;
        let data = edit_data(&m);
        assert_eq!(data.suggestion(SuggestedField::City), Some("Okara"));
        assert_eq!(data.suggestion(SuggestedField::Caste), None);
    }
}
