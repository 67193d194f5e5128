use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;
const JWT_SECRET_KEY: &str = "jwt_secret";

pub async fn generate_access_token(user_id: &str, username: &str, is_admin: bool) -> Result<String> {
    let secret = get_jwt_secret().await?;
    encode_claims(&build_claims(user_id, username, is_admin), &secret)
}

pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;
    decode_claims(token, &secret)
}

fn build_claims(user_id: &str, username: &str, is_admin: bool) -> TokenClaims {
    let now = Utc::now();
    TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        exp: (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    }
}

fn encode_claims(claims: &TokenClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

fn decode_claims(token: &str, secret: &str) -> Result<TokenClaims> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;
    Ok(data.claims)
}

/// Секрет хранится в sys_settings; при первом обращении генерируется
async fn get_jwt_secret() -> Result<String> {
    if let Some(secret) = load_secret().await? {
        return Ok(secret);
    }
    let secret = generate_jwt_secret();
    save_secret(&secret).await?;
    tracing::info!("Generated new JWT secret");
    Ok(secret)
}

/// 256 бит случайных данных в base64
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&bytes)
}

async fn load_secret() -> Result<Option<String>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [JWT_SECRET_KEY.into()],
        ))
        .await?;
    match row {
        Some(row) => Ok(Some(row.try_get("", "value")?)),
        None => Ok(None),
    }
}

async fn save_secret(secret: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT OR IGNORE INTO sys_settings (key, value, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            [
                JWT_SECRET_KEY.into(),
                secret.to_string().into(),
                "JWT signing secret".into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await
        .context("Failed to store JWT secret")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_roundtrip_with_secret() {
        let secret = generate_jwt_secret();
        let token = encode_claims(&build_claims("u1", "ayesha", false), &secret).unwrap();
        let claims = decode_claims(&token, &secret).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.username, "ayesha");
        assert!(!claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let token = encode_claims(&build_claims("u1", "a", true), "one-secret").unwrap();
        assert!(decode_claims(&token, "other-secret").is_err());
    }

    #[test]
    fn test_secret_is_256_bit() {
        use base64::{engine::general_purpose, Engine as _};
        let bytes = general_purpose::STANDARD
            .decode(generate_jwt_secret())
            .unwrap();
        assert_eq!(bytes.len(), 32);
    }
}
