use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a002_profile::edit::{ProfileEditData, ProfileEditRequest};
use contracts::domain::a002_profile::moderation::{ModerateRequest, ModerateResponse};
use contracts::domain::a002_profile::photo::{PhotoModerationRequest, PhotoResponse};
use contracts::domain::a002_profile::snapshot::{ProfileListItem, ProfileListQuery, ProfileResponse};
use contracts::shared::api_error::SuccessResponse;
use contracts::shared::paging::PageEnvelope;

use crate::domain::a002_profile::service;
use crate::shared::error::AppResult;

/// GET /api/admin/profiles?status=&page=&limit=
pub async fn list(
    Query(query): Query<ProfileListQuery>,
) -> AppResult<Json<PageEnvelope<ProfileListItem>>> {
    Ok(Json(service::list(query).await?))
}

/// GET /api/admin/profiles/:id
pub async fn get_by_id(Path(id): Path<String>) -> AppResult<Json<ProfileResponse>> {
    let profile = service::snapshot(&id).await?;
    Ok(Json(ProfileResponse { profile }))
}

/// POST /api/admin/profiles/:id/moderate
pub async fn moderate(
    Path(id): Path<String>,
    Json(request): Json<ModerateRequest>,
) -> AppResult<Json<ModerateResponse>> {
    let status = service::moderate(&id, request).await?;
    Ok(Json(ModerateResponse { status }))
}

/// PATCH /api/admin/profiles/:id/photos/:photo_id
pub async fn moderate_photo(
    Path((id, photo_id)): Path<(String, String)>,
    Json(request): Json<PhotoModerationRequest>,
) -> AppResult<Json<PhotoResponse>> {
    let photo = service::moderate_photo(&id, &photo_id, request).await?;
    Ok(Json(PhotoResponse { photo }))
}

/// DELETE /api/admin/profiles/:id/photos/:photo_id
pub async fn delete_photo(
    Path((id, photo_id)): Path<(String, String)>,
) -> AppResult<Json<SuccessResponse>> {
    service::delete_photo(&id, &photo_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/admin/profiles/:id/edit
pub async fn get_edit(Path(id): Path<String>) -> AppResult<Json<ProfileEditData>> {
    Ok(Json(service::get_edit(&id).await?))
}

/// PATCH /api/admin/profiles/:id/edit
pub async fn update_edit(
    Path(id): Path<String>,
    Json(request): Json<ProfileEditRequest>,
) -> AppResult<Json<ProfileEditData>> {
    Ok(Json(service::update_edit(&id, request).await?))
}
