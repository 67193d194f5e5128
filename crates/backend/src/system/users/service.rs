use anyhow::Result;
use chrono::Utc;
use contracts::shared::paging::{PageEnvelope, PageQuery};
use contracts::system::account::{
    normalize_phone, AccountSettings, ChangePasswordDto, PhoneVerification, UpdateAccountDto,
};
use contracts::system::users::{
    CreateUserDto, RequeueRequest, User, VerificationDecision, VerificationQueueItem,
    VerificationQueueQuery, VerificationStatus,
};

use super::repository;
use crate::shared::error::AppError;
use crate::system::auth::password;

pub async fn create(dto: CreateUserDto) -> Result<String> {
    let username = dto.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::validation("Username cannot be empty").into());
    }
    if repository::get_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".into()).into());
    }
    contracts::system::account::validate_password_strength(&dto.password)
        .map_err(AppError::Validation)?;

    let password_hash = password::hash_password(&dto.password)?;
    let now = Utc::now().to_rfc3339();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username,
        email: non_empty(dto.email),
        full_name: non_empty(dto.full_name),
        phone: None,
        phone_verification: VerificationStatus::Unverified,
        verification_note: None,
        is_active: true,
        is_admin: dto.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };
    repository::create_with_password(&user, &password_hash).await?;
    tracing::info!("User '{}' created (admin: {})", user.username, user.is_admin);
    Ok(user.id)
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

async fn require_user(id: &str) -> Result<User> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found").into())
}

/// Проверка логина и пароля. `None` при неверной паре или неактивном пользователе
pub async fn verify_credentials(username: &str, password_plain: &str) -> Result<Option<User>> {
    let Some(user) = repository::get_by_username(username.trim()).await? else {
        return Ok(None);
    };
    if !user.is_active {
        return Ok(None);
    }
    let Some(hash) = repository::get_password_hash(&user.id).await? else {
        return Ok(None);
    };
    if !password::verify_password(password_plain, &hash)? {
        return Ok(None);
    }
    repository::update_last_login(&user.id).await?;
    Ok(Some(user))
}

pub async fn get_account(user_id: &str) -> Result<AccountSettings> {
    let user = require_user(user_id).await?;
    Ok(account_settings(user))
}

pub async fn update_account(user_id: &str, dto: UpdateAccountDto) -> Result<AccountSettings> {
    dto.validate().map_err(AppError::Validation)?;
    let mut user = require_user(user_id).await?;

    if dto.resets_verification(user.phone.as_deref()) {
        tracing::info!("Phone changed for '{}', verification reset", user.username);
        user.phone_verification = VerificationStatus::Unverified;
        user.verification_note = None;
    }
    if let Some(email) = dto.email {
        user.email = non_empty(Some(email));
    }
    if let Some(full_name) = dto.full_name {
        user.full_name = non_empty(Some(full_name));
    }
    if let Some(phone) = dto.phone {
        let phone = normalize_phone(&phone);
        user.phone = if phone.is_empty() { None } else { Some(phone) };
    }
    user.updated_at = Utc::now().to_rfc3339();

    repository::update_account(&user).await?;
    Ok(account_settings(user))
}

pub async fn change_password(user_id: &str, dto: ChangePasswordDto) -> Result<()> {
    dto.validate().map_err(AppError::Validation)?;
    let hash = repository::get_password_hash(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    if !password::verify_password(&dto.current_password, &hash)? {
        return Err(AppError::validation("Current password is incorrect").into());
    }
    let new_hash = password::hash_password(&dto.new_password)?;
    repository::update_password(user_id, &new_hash).await?;
    tracing::info!("Password changed for user {}", user_id);
    Ok(())
}

pub async fn get_phone_verification(user_id: &str) -> Result<PhoneVerification> {
    let user = require_user(user_id).await?;
    Ok(phone_verification(&user))
}

/// Отправка номера на проверку: UNVERIFIED | REJECTED → PENDING
pub async fn submit_phone_verification(user_id: &str) -> Result<PhoneVerification> {
    let mut user = require_user(user_id).await?;
    if user.phone.as_deref().map_or(true, str::is_empty) {
        return Err(AppError::validation("Add a phone number before requesting verification").into());
    }
    if !user.phone_verification.can_submit() {
        return Err(AppError::validation(format!(
            "Phone verification is already {}",
            user.phone_verification.as_str()
        ))
        .into());
    }
    repository::set_verification(
        &user.id,
        VerificationStatus::Pending,
        None,
        Some(Utc::now().to_rfc3339()),
    )
    .await?;
    user.phone_verification = VerificationStatus::Pending;
    user.verification_note = None;
    Ok(phone_verification(&user))
}

pub async fn list_verification(
    query: VerificationQueueQuery,
) -> Result<PageEnvelope<VerificationQueueItem>> {
    let paging = PageQuery {
        page: query.page,
        limit: query.limit,
    };
    let (page, limit) = paging.normalized();
    let total = repository::count_verification(query.status).await?;
    let items = repository::list_verification(query.status, paging.offset(), limit).await?;
    Ok(PageEnvelope::new(items, page, limit, total))
}

pub async fn decide_verification(decision: VerificationDecision) -> Result<VerificationStatus> {
    let user = require_user(&decision.user_id).await?;
    let next = decision
        .resolve(user.phone_verification)
        .map_err(AppError::Validation)?;
    let note = non_empty(decision.note);
    repository::set_verification(&user.id, next, note, None).await?;
    tracing::info!(
        "Phone verification for '{}': {} -> {}",
        user.username,
        user.phone_verification.as_str(),
        next.as_str()
    );
    Ok(next)
}

pub async fn requeue(request: RequeueRequest) -> Result<VerificationStatus> {
    let user = require_user(&request.user_id).await?;
    if user.phone.as_deref().map_or(true, str::is_empty) {
        return Err(AppError::validation("User has no phone number").into());
    }
    repository::set_verification(
        &user.id,
        VerificationStatus::Pending,
        None,
        Some(Utc::now().to_rfc3339()),
    )
    .await?;
    Ok(VerificationStatus::Pending)
}

fn account_settings(user: User) -> AccountSettings {
    AccountSettings {
        username: user.username,
        email: user.email,
        full_name: user.full_name,
        phone: user.phone,
        phone_verification: user.phone_verification,
    }
}

fn phone_verification(user: &User) -> PhoneVerification {
    PhoneVerification {
        phone: user.phone.clone(),
        status: user.phone_verification,
        note: user.verification_note.clone(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(" a@b.pk ".into())), Some("a@b.pk".into()));
        assert_eq!(non_empty(None), None);
    }
}
