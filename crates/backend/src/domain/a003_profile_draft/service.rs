use anyhow::Result;
use contracts::domain::a001_taxonomy::kind::RecordKind;
use contracts::domain::a002_profile::moderation::ModerationStatus;
use contracts::domain::a003_profile_draft::draft::{
    MyProfileResponse, ProfileDraft, SaveStepRequest, SaveStepResponse,
};

use crate::domain::a001_taxonomy::service as taxonomy_service;
use crate::domain::a002_profile::repository::{self as profile_repository, Model};
use crate::shared::error::AppError;

/// GET /api/profile: своя анкета или пустой черновик
pub async fn get_my(user_id: &str) -> Result<MyProfileResponse> {
    Ok(match profile_repository::get_by_user(user_id).await? {
        Some(m) => MyProfileResponse {
            profile_id: Some(m.id.clone()),
            draft: m.to_draft(),
            completion_percentage: m.completion_percentage.clamp(0, 100) as u8,
            moderation_status: Some(m.status()),
            moderation_feedback: m.moderation_feedback.clone(),
        },
        None => MyProfileResponse {
            profile_id: None,
            draft: ProfileDraft::default(),
            completion_percentage: 0,
            moderation_status: None,
            moderation_feedback: None,
        },
    })
}

/// Каждая выбранная ссылка должна существовать и лежать под выбранным родителем
async fn check_refs(d: &ProfileDraft) -> Result<()> {
    taxonomy_service::check_chain(&[
        (RecordKind::Origin, d.origin_id.as_deref()),
        (RecordKind::Ethnicity, d.ethnicity_id.as_deref()),
        (RecordKind::Caste, d.caste_id.as_deref()),
    ])
    .await?;
    taxonomy_service::check_chain(&[
        (RecordKind::Country, d.country_id.as_deref()),
        (RecordKind::State, d.state_id.as_deref()),
        (RecordKind::City, d.city_id.as_deref()),
    ])
    .await?;
    taxonomy_service::check_chain(&[
        (RecordKind::Sect, d.sect_id.as_deref()),
        (RecordKind::Maslak, d.maslak_id.as_deref()),
    ])
    .await?;
    taxonomy_service::check_chain(&[(RecordKind::Language, d.mother_tongue_id.as_deref())]).await?;
    taxonomy_service::check_chain(&[(RecordKind::Level, d.education_level_id.as_deref())]).await?;
    taxonomy_service::check_chain(&[(RecordKind::Field, d.education_field_id.as_deref())]).await?;
    Ok(())
}

/// Любое сохранение шага возвращает анкету на модерацию; заблокированную не трогаем
fn apply_step(model: &mut Model, draft: &ProfileDraft) -> Result<(), AppError> {
    if !model.status().owner_can_edit() {
        return Err(AppError::Forbidden(
            "This profile has been banned and cannot be edited".into(),
        ));
    }
    model.apply_draft(draft);
    model.completion_percentage = i32::from(draft.completion_percentage());
    model.moderation_status = ModerationStatus::Pending.as_str().to_string();
    Ok(())
}

fn response(model: &Model, draft: &ProfileDraft) -> SaveStepResponse {
    SaveStepResponse {
        profile_id: model.id.clone(),
        completion_percentage: draft.completion_percentage(),
        next_step: draft.next_step(),
    }
}

/// POST /api/profile: создание анкеты на первом шаге
pub async fn create(user_id: &str, request: SaveStepRequest) -> Result<SaveStepResponse> {
    if profile_repository::get_by_user(user_id).await?.is_some() {
        return Err(AppError::Conflict("Profile already exists, use PATCH to continue".into()).into());
    }
    request
        .draft
        .validate_through(request.step)
        .map_err(AppError::Validation)?;
    check_refs(&request.draft).await?;

    let mut model = Model::new_for_user(user_id);
    apply_step(&mut model, &request.draft)?;
    let saved = profile_repository::insert(model).await?;
    tracing::info!("Profile {} created for user {}", saved.id, user_id);
    Ok(response(&saved, &request.draft))
}

/// PATCH /api/profile: шаг 2..7 (или повторное сохранение любого шага)
pub async fn save_step(user_id: &str, request: SaveStepRequest) -> Result<SaveStepResponse> {
    let mut model = profile_repository::get_by_user(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile not found, complete step 1 first"))?;
    if !model.status().owner_can_edit() {
        tracing::warn!("Rejected edit of banned profile {} by user {}", model.id, user_id);
        return Err(AppError::Forbidden("This profile has been banned and cannot be edited".into()).into());
    }
    request
        .draft
        .validate_through(request.step)
        .map_err(AppError::Validation)?;
    check_refs(&request.draft).await?;

    let previous = model.status();
    apply_step(&mut model, &request.draft)?;
    let saved = profile_repository::save(model).await?;
    if previous != ModerationStatus::Pending {
        tracing::info!(
            "Profile {} edited by owner, status {} -> PENDING",
            saved.id,
            previous.as_str()
        );
    }
    Ok(response(&saved, &request.draft))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_info() -> ProfileDraft {
        ProfileDraft {
            profile_for: "self".into(),
            gender: "female".into(),
            date_of_birth: "1996-03-01".into(),
            marital_status: "never_married".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_saving_step_resets_moderation() {
        let mut model = Model::new_for_user("u1");
        model.moderation_status = ModerationStatus::Approved.as_str().to_string();
        let draft = basic_info();
        apply_step(&mut model, &draft).unwrap();
        assert_eq!(model.status(), ModerationStatus::Pending);
        assert_eq!(model.completion_percentage, 14);
        let r = response(&model, &draft);
        assert_eq!(r.next_step.number(), 2);
    }

    #[test]
    fn test_banned_profile_stays_banned_on_save() {
        let mut model = Model::new_for_user("u1");
        model.moderation_status = ModerationStatus::Banned.as_str().to_string();
        let result = apply_step(&mut model, &basic_info());
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert_eq!(model.status(), ModerationStatus::Banned);
        assert_eq!(model.completion_percentage, 0);
    }
}
