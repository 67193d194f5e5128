use serde::{Deserialize, Serialize};

use super::account::validate_password_strength;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

/// POST /api/auth/register: самостоятельная регистрация конечного пользователя
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        let name = self.username.trim();
        if name.len() < 3 {
            return Err("Username must be at least 3 characters long".into());
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            return Err("Username may contain only latin letters, digits, '_' and '.'".into());
        }
        validate_password_strength(&self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    pub username: String,
    pub is_admin: bool,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let mut req = RegisterRequest {
            username: "ay".into(),
            password: "password1".into(),
            email: None,
            full_name: None,
        };
        assert!(req.validate().is_err());
        req.username = "ayesha_k".into();
        assert!(req.validate().is_ok());
        req.password = "1234".into();
        assert!(req.validate().is_err());
    }
}
