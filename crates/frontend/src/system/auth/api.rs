use contracts::shared::api_error::SuccessResponse;
use contracts::system::account::{AccountSettings, ChangePasswordDto, PhoneVerification, UpdateAccountDto};
use contracts::system::auth::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};

use crate::shared::api_utils::{get_json, patch_json, post_json};

pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { username, password };
    post_json("/api/auth/login", &request).await
}

/// Регистрация сразу возвращает токен, как вход
pub async fn register(request: RegisterRequest) -> Result<LoginResponse, String> {
    post_json("/api/auth/register", &request).await
}

/// Проверка сохранённого токена
pub async fn get_current_user() -> Result<UserInfo, String> {
    get_json("/api/auth/me").await
}

pub async fn get_account() -> Result<AccountSettings, String> {
    get_json("/api/auth/account").await
}

pub async fn update_account(dto: &UpdateAccountDto) -> Result<AccountSettings, String> {
    patch_json("/api/auth/account", dto).await
}

pub async fn change_password(dto: &ChangePasswordDto) -> Result<(), String> {
    let _: SuccessResponse = post_json("/api/auth/change-password", dto).await?;
    Ok(())
}

pub async fn get_phone_verification() -> Result<PhoneVerification, String> {
    get_json("/api/auth/phone-verification").await
}

/// Отправить текущий номер на проверку администратору
pub async fn submit_phone_verification() -> Result<PhoneVerification, String> {
    post_json("/api/auth/phone-verification", &serde_json::json!({})).await
}
