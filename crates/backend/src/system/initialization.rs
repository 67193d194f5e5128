use anyhow::Result;
use contracts::system::users::CreateUserDto;

use crate::shared::config::AdminConfig;
use crate::system::users::{repository, service};

/// Создать администратора из `[admin]`, если в базе нет ни одного
pub async fn ensure_admin_user_exists(admin: &AdminConfig) -> Result<()> {
    if repository::count_admins().await? > 0 {
        return Ok(());
    }
    if repository::get_by_username(&admin.username).await?.is_some() {
        tracing::warn!(
            "User '{}' exists but is not an administrator; bootstrap admin skipped",
            admin.username
        );
        return Ok(());
    }

    tracing::info!("No administrators found, creating bootstrap admin...");
    let admin_id = service::create(CreateUserDto {
        username: admin.username.clone(),
        password: admin.password.clone(),
        email: None,
        full_name: Some("Administrator".to_string()),
        is_admin: true,
    })
    .await?;

    tracing::warn!(
        "Bootstrap admin '{}' created ({}). Change the password after first login",
        admin.username,
        admin_id
    );
    Ok(())
}

/// Начальные данные справочников
pub async fn seed_reference_data() -> Result<()> {
    crate::domain::a001_taxonomy::seed::seed_if_empty().await
}
