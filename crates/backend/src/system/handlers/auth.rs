use axum::Json;
use contracts::system::auth::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use contracts::system::users::{CreateUserDto, User};

use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;
use crate::system::{auth::jwt, users::service as user_service};

fn user_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        email: user.email,
        is_admin: user.is_admin,
    }
}

async fn issue_token(user: User) -> AppResult<Json<LoginResponse>> {
    let access_token = jwt::generate_access_token(&user.id, &user.username, user.is_admin).await?;
    Ok(Json(LoginResponse {
        access_token,
        user: user_info(user),
    }))
}

/// POST /api/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> AppResult<Json<LoginResponse>> {
    let user = user_service::verify_credentials(&request.username, &request.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".into()))?;
    tracing::info!("User '{}' logged in", user.username);
    issue_token(user).await
}

/// POST /api/auth/register
pub async fn register(Json(request): Json<RegisterRequest>) -> AppResult<Json<LoginResponse>> {
    request.validate().map_err(AppError::Validation)?;
    let user_id = user_service::create(CreateUserDto {
        username: request.username,
        password: request.password,
        email: request.email,
        full_name: request.full_name,
        is_admin: false,
    })
    .await?;
    let user = user_service::get_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    issue_token(user).await
}

/// GET /api/auth/me
pub async fn current_user(CurrentUser(claims): CurrentUser) -> AppResult<Json<UserInfo>> {
    let user = user_service::get_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(user_info(user)))
}
