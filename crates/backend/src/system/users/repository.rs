use anyhow::{Context, Result};
use contracts::system::users::{User, VerificationQueueItem, VerificationStatus};
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement, Value};

use crate::shared::data::db::get_connection;

const USER_COLUMNS: &str = "id, username, email, full_name, phone, phone_verification, verification_note, \
     is_active, is_admin, created_at, updated_at, last_login_at";

fn map_user(row: &QueryResult) -> Result<User> {
    let verification: String = row.try_get("", "phone_verification")?;
    Ok(User {
        id: row.try_get("", "id")?,
        username: row.try_get("", "username")?,
        email: row.try_get("", "email")?,
        full_name: row.try_get("", "full_name")?,
        phone: row.try_get("", "phone")?,
        phone_verification: VerificationStatus::from_str(&verification).unwrap_or_default(),
        verification_note: row.try_get("", "verification_note")?,
        is_active: row.try_get::<i32>("", "is_active")? != 0,
        is_admin: row.try_get::<i32>("", "is_admin")? != 0,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
        last_login_at: row.try_get("", "last_login_at")?,
    })
}

fn stmt(sql: &str, values: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, values)
}

pub async fn create_with_password(user: &User, password_hash: &str) -> Result<()> {
    get_connection()
        .execute(stmt(
            "INSERT INTO sys_users (id, username, email, password_hash, full_name, phone, phone_verification,
                 is_active, is_admin, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            vec![
                user.id.clone().into(),
                user.username.clone().into(),
                user.email.clone().into(),
                password_hash.to_string().into(),
                user.full_name.clone().into(),
                user.phone.clone().into(),
                user.phone_verification.as_str().into(),
                i32::from(user.is_active).into(),
                i32::from(user.is_admin).into(),
                user.created_at.clone().into(),
                user.updated_at.clone().into(),
            ],
        ))
        .await
        .context("Failed to insert user")?;
    Ok(())
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM sys_users WHERE id = ?", USER_COLUMNS);
    let row = get_connection()
        .query_one(stmt(&sql, vec![id.into()]))
        .await?;
    row.as_ref().map(map_user).transpose()
}

pub async fn get_by_username(username: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM sys_users WHERE username = ?", USER_COLUMNS);
    let row = get_connection()
        .query_one(stmt(&sql, vec![username.into()]))
        .await?;
    row.as_ref().map(map_user).transpose()
}

pub async fn get_password_hash(user_id: &str) -> Result<Option<String>> {
    let row = get_connection()
        .query_one(stmt(
            "SELECT password_hash FROM sys_users WHERE id = ?",
            vec![user_id.into()],
        ))
        .await?;
    match row {
        Some(row) => Ok(Some(row.try_get("", "password_hash")?)),
        None => Ok(None),
    }
}

/// Почта, имя, телефон и статус подтверждения одной записью
pub async fn update_account(user: &User) -> Result<()> {
    get_connection()
        .execute(stmt(
            "UPDATE sys_users
             SET email = ?, full_name = ?, phone = ?, phone_verification = ?, verification_note = ?, updated_at = ?
             WHERE id = ?",
            vec![
                user.email.clone().into(),
                user.full_name.clone().into(),
                user.phone.clone().into(),
                user.phone_verification.as_str().into(),
                user.verification_note.clone().into(),
                user.updated_at.clone().into(),
                user.id.clone().into(),
            ],
        ))
        .await
        .context("Failed to update account")?;
    Ok(())
}

pub async fn update_password(id: &str, password_hash: &str) -> Result<()> {
    get_connection()
        .execute(stmt(
            "UPDATE sys_users SET password_hash = ?, updated_at = ? WHERE id = ?",
            vec![
                password_hash.to_string().into(),
                chrono::Utc::now().to_rfc3339().into(),
                id.to_string().into(),
            ],
        ))
        .await
        .context("Failed to update password")?;
    Ok(())
}

pub async fn update_last_login(id: &str) -> Result<()> {
    get_connection()
        .execute(stmt(
            "UPDATE sys_users SET last_login_at = ? WHERE id = ?",
            vec![chrono::Utc::now().to_rfc3339().into(), id.to_string().into()],
        ))
        .await
        .context("Failed to update last login")?;
    Ok(())
}

/// `submitted_at` обновляется только при постановке в очередь
pub async fn set_verification(
    id: &str,
    status: VerificationStatus,
    note: Option<String>,
    submitted_at: Option<String>,
) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    get_connection()
        .execute(stmt(
            "UPDATE sys_users
             SET phone_verification = ?, verification_note = ?,
                 verification_submitted_at = COALESCE(?, verification_submitted_at), updated_at = ?
             WHERE id = ?",
            vec![
                status.as_str().into(),
                note.into(),
                submitted_at.into(),
                now.into(),
                id.to_string().into(),
            ],
        ))
        .await
        .context("Failed to update phone verification")?;
    Ok(())
}

pub async fn count_admins() -> Result<u64> {
    let row = get_connection()
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS count FROM sys_users WHERE is_admin = 1".to_string(),
        ))
        .await?;
    match row {
        Some(row) => Ok(row.try_get::<i64>("", "count")? as u64),
        None => Ok(0),
    }
}

/// Без фильтра в очередь попадают все, кто хоть раз отправлял номер
fn verification_filter(status: Option<VerificationStatus>) -> (String, Vec<Value>) {
    match status {
        Some(s) => (
            "phone_verification = ?".to_string(),
            vec![s.as_str().into()],
        ),
        None => (
            "phone_verification <> 'UNVERIFIED'".to_string(),
            Vec::new(),
        ),
    }
}

pub async fn count_verification(status: Option<VerificationStatus>) -> Result<u64> {
    let (filter, values) = verification_filter(status);
    let sql = format!("SELECT COUNT(*) AS count FROM sys_users WHERE {}", filter);
    let row = get_connection().query_one(stmt(&sql, values)).await?;
    match row {
        Some(row) => Ok(row.try_get::<i64>("", "count")? as u64),
        None => Ok(0),
    }
}

pub async fn list_verification(
    status: Option<VerificationStatus>,
    offset: u64,
    limit: u64,
) -> Result<Vec<VerificationQueueItem>> {
    let (filter, mut values) = verification_filter(status);
    let sql = format!(
        "SELECT id, username, full_name, phone, phone_verification, verification_note, verification_submitted_at
         FROM sys_users WHERE {}
         ORDER BY verification_submitted_at IS NULL, verification_submitted_at ASC, username ASC
         LIMIT ? OFFSET ?",
        filter
    );
    values.push((limit as i64).into());
    values.push(i64::try_from(offset).unwrap_or(i64::MAX).into());

    let rows = get_connection().query_all(stmt(&sql, values)).await?;
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let status: String = row.try_get("", "phone_verification")?;
        items.push(VerificationQueueItem {
            user_id: row.try_get("", "id")?,
            username: row.try_get("", "username")?,
            full_name: row.try_get("", "full_name")?,
            phone: row.try_get("", "phone")?,
            status: VerificationStatus::from_str(&status).unwrap_or_default(),
            note: row.try_get("", "verification_note")?,
            submitted_at: row.try_get("", "verification_submitted_at")?,
        });
    }
    Ok(items)
}
