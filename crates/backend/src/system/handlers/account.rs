use axum::Json;
use contracts::shared::api_error::SuccessResponse;
use contracts::system::account::{
    AccountSettings, ChangePasswordDto, PhoneVerification, UpdateAccountDto,
};

use crate::shared::error::AppResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// GET /api/auth/account
pub async fn get_account(CurrentUser(claims): CurrentUser) -> AppResult<Json<AccountSettings>> {
    Ok(Json(service::get_account(&claims.sub).await?))
}

/// PATCH /api/auth/account
pub async fn update_account(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<UpdateAccountDto>,
) -> AppResult<Json<AccountSettings>> {
    Ok(Json(service::update_account(&claims.sub, dto).await?))
}

/// POST /api/auth/change-password
pub async fn change_password(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<ChangePasswordDto>,
) -> AppResult<Json<SuccessResponse>> {
    service::change_password(&claims.sub, dto).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/auth/phone-verification
pub async fn get_phone_verification(
    CurrentUser(claims): CurrentUser,
) -> AppResult<Json<PhoneVerification>> {
    Ok(Json(service::get_phone_verification(&claims.sub).await?))
}

/// POST /api/auth/phone-verification
pub async fn submit_phone_verification(
    CurrentUser(claims): CurrentUser,
) -> AppResult<Json<PhoneVerification>> {
    Ok(Json(service::submit_phone_verification(&claims.sub).await?))
}
