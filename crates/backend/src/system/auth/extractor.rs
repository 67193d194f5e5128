use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::TokenClaims;

use crate::shared::error::AppError;

/// Текущий пользователь из claims, положенных middleware
/// `async fn handler(CurrentUser(claims): CurrentUser)`
pub struct CurrentUser(pub TokenClaims);

impl CurrentUser {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.0.is_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Administrator access required".into()))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
    }
}
