use axum::Json;
use contracts::domain::a003_profile_draft::draft::{
    MyProfileResponse, SaveStepRequest, SaveStepResponse,
};

use crate::domain::a003_profile_draft::service;
use crate::shared::error::AppResult;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/profile
pub async fn get_my(CurrentUser(claims): CurrentUser) -> AppResult<Json<MyProfileResponse>> {
    Ok(Json(service::get_my(&claims.sub).await?))
}

/// POST /api/profile
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(request): Json<SaveStepRequest>,
) -> AppResult<Json<SaveStepResponse>> {
    Ok(Json(service::create(&claims.sub, request).await?))
}

/// PATCH /api/profile
pub async fn save_step(
    CurrentUser(claims): CurrentUser,
    Json(request): Json<SaveStepRequest>,
) -> AppResult<Json<SaveStepResponse>> {
    Ok(Json(service::save_step(&claims.sub, request).await?))
}
