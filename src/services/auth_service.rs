use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Map, Value};

use crate::{
    dto::auth::{Claims, TokenResponse},
    error::{AppError, AppResult},
};

/// Bearer tokens stay valid for seven days and cannot be revoked.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// HS256 keys derived from the shared signing secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    pub fn issue(&self, mut payload: Map<String, Value>) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(Duration::days(TOKEN_TTL_DAYS))
            .ok_or_else(|| AppError::Upstream("failed to set token expiration".into()))?;

        payload.remove("iat");
        payload.remove("exp");
        // A non-string email is signed as-is but identifies nobody.
        let email = match payload.remove("email") {
            Some(Value::String(email)) => Some(email),
            Some(Value::Null) | None => None,
            Some(other) => {
                payload.insert("email".to_string(), other);
                None
            }
        };

        let claims = Claims {
            email,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            extra: payload,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Upstream(format!("token signing failed: {e}")))
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "bearer token rejected");
                AppError::unauthorized()
            })
    }
}

pub fn issue_token(keys: &TokenKeys, payload: Map<String, Value>) -> AppResult<TokenResponse> {
    let token = keys.issue(payload)?;
    Ok(TokenResponse { token })
}
