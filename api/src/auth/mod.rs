pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;
pub mod permissions;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use util::config;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
    #[error("token lifetime is out of range")]
    Lifetime,
}

/// Generates a JWT and its expiry timestamp (RFC 3339) for a given user.
pub fn generate_jwt(user_id: i64, superuser: bool) -> Result<(String, String), AuthError> {
    let minutes = i64::try_from(config::jwt_duration_minutes()).map_err(|_| AuthError::Lifetime)?;
    let expiry = Utc::now() + Duration::minutes(minutes);
    let token = Claims::new(user_id, superuser, expiry)?.encode()?;

    Ok((token, expiry.to_rfc3339()))
}
