use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};

use crate::{dto::auth::Claims, error::AppError, services::auth_service::TokenKeys};

/// Decoded bearer-token claims of the caller.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

impl AuthClaims {
    pub fn email(&self) -> Option<&str> {
        self.0.email.as_deref()
    }
}

/// Rejects callers whose token was issued for a different email.
pub fn ensure_same_email(claims: &AuthClaims, email: &str) -> Result<(), AppError> {
    if claims.email() != Some(email) {
        return Err(AppError::forbidden());
    }
    Ok(())
}

pub fn bearer_token(value: &str) -> Option<&str> {
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for AuthClaims
where
    Arc<TokenKeys>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(AppError::unauthorized)?;

        let keys = Arc::<TokenKeys>::from_ref(state);
        let claims = keys.verify(token)?;
        Ok(AuthClaims(claims))
    }
}
