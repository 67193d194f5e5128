use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use contracts::system::auth::TokenClaims;

use crate::shared::error::AppError;

fn bearer_token(req: &Request<Body>) -> Result<&str, AppError> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
}

/// Через await держим только свой токен, не ссылку на запрос
async fn authenticate(token: String) -> Result<TokenClaims, AppError> {
    super::jwt::validate_token(&token)
        .await
        .map_err(|_| AppError::Unauthorized("Session expired or invalid token".into()))
}

/// Требует действительный JWT; claims кладутся в extensions запроса
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let token = bearer_token(&req)?.to_string();
    let claims = authenticate(token).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Требует JWT с флагом администратора
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let token = bearer_token(&req)?.to_string();
    let claims = authenticate(token).await?;
    if !claims.is_admin {
        return Err(AppError::Forbidden("Administrator access required".into()));
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn test_bearer_token_parsing() {
        let req = Request::builder()
            .header("Authorization", "Bearer abc.def")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def");

        let basic = Request::builder()
            .header("Authorization", "Basic xyz")
            .body(Body::empty())
            .unwrap();
        assert!(matches!(bearer_token(&basic), Err(AppError::Unauthorized(_))));
        assert!(bearer_token(&Request::new(Body::empty())).is_err());
    }

    #[test]
    fn test_auth_futures_are_send() {
        // from_fn требует Send-футуру от middleware
        assert_send(&authenticate(String::new()));
    }
}
