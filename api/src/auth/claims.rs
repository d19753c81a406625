//! JWT payload carried by every authenticated request.

use super::AuthError;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use util::config;

/// `sub` is the user id; `superuser` mirrors `users.is_superuser` at issue time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub superuser: bool,
}

impl Claims {
    pub fn new(user_id: i64, superuser: bool, expires_at: DateTime<Utc>) -> Result<Self, AuthError> {
        let exp = usize::try_from(expires_at.timestamp()).map_err(|_| AuthError::Lifetime)?;
        Ok(Self {
            sub: user_id,
            exp,
            superuser,
        })
    }

    /// Signs the claims with the configured secret (HS256).
    pub fn encode(&self) -> Result<String, AuthError> {
        let key = EncodingKey::from_secret(config::jwt_secret().as_bytes());
        Ok(jsonwebtoken::encode(&Header::new(Algorithm::HS256), self, &key)?)
    }

    /// Verifies signature and expiry.
    pub fn decode(token: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_secret(config::jwt_secret().as_bytes());
        jsonwebtoken::decode::<Self>(token, &key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
    }
}

/// Extracted identity of the caller; see `extractors.rs`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> i64 {
        self.0.sub
    }

    pub fn is_superuser(&self) -> bool {
        self.0.superuser
    }
}
