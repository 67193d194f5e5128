use serde::{Deserialize, Serialize};

use super::users::VerificationStatus;

pub const MIN_PASSWORD_LEN: usize = 8;

/// GET /api/auth/account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettings {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub phone_verification: VerificationStatus,
}

/// PATCH /api/auth/account. Отсутствующее поле не меняется, пустая строка стирает
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountDto {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl UpdateAccountDto {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(email) = self.email.as_deref().map(str::trim) {
            if !email.is_empty() && !email.contains('@') {
                return Err("Email address is not valid".into());
            }
        }
        if let Some(phone) = self.phone.as_deref().map(str::trim) {
            if !phone.is_empty() && !is_phone_number(phone) {
                return Err("Phone number may contain only digits, spaces and a leading '+'".into());
            }
        }
        Ok(())
    }

    /// Смена номера сбрасывает подтверждение в UNVERIFIED
    pub fn resets_verification(&self, current_phone: Option<&str>) -> bool {
        match self.phone.as_deref() {
            None => false,
            Some(new) => normalize_phone(new) != current_phone.map(normalize_phone).unwrap_or_default(),
        }
    }
}

fn is_phone_number(s: &str) -> bool {
    let digits = s.trim_start_matches('+');
    digits.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
        && digits.chars().filter(|c| c.is_ascii_digit()).count() >= 7
}

/// Номер без пробелов и дефисов
pub fn normalize_phone(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

/// POST /api/auth/change-password
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.current_password.is_empty() {
            return Err("Current password is required".into());
        }
        validate_password_strength(&self.new_password)?;
        if self.new_password == self.current_password {
            return Err("New password must differ from the current one".into());
        }
        Ok(())
    }
}

pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

/// GET/POST /api/auth/phone-verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneVerification {
    pub phone: Option<String>,
    pub status: VerificationStatus,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_change_resets_verification() {
        let dto = UpdateAccountDto {
            phone: Some("+92 300 1234567".into()),
            ..Default::default()
        };
        assert!(!dto.resets_verification(Some("+923001234567")));
        assert!(dto.resets_verification(Some("+923009999999")));
        assert!(dto.resets_verification(None));

        let untouched = UpdateAccountDto {
            full_name: Some("Ayesha".into()),
            ..Default::default()
        };
        assert!(!untouched.resets_verification(Some("+923001234567")));
    }

    #[test]
    fn test_password_rules() {
        let dto = ChangePasswordDto {
            current_password: "oldpassword".into(),
            new_password: "short".into(),
        };
        assert!(dto.validate().is_err());
        let dto = ChangePasswordDto {
            current_password: "oldpassword".into(),
            new_password: "longenough".into(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_account_validation() {
        let bad = UpdateAccountDto {
            phone: Some("call me".into()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad_email = UpdateAccountDto {
            email: Some("nope".into()),
            ..Default::default()
        };
        assert!(bad_email.validate().is_err());
        assert!(UpdateAccountDto::default().validate().is_ok());
    }
}
