use crate::core::errors::ClinicError;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sid: Uuid,  // Session ID
    pub exp: usize, // Expiration timestamp
}

/// Signs the session id carried in the session cookie.
pub struct JwtService {
    secret: String,
    ttl_secs: u64,
}

impl JwtService {
    pub fn new(secret: String, ttl_secs: u64) -> Self {
        JwtService { secret, ttl_secs }
    }

    pub fn generate_token(&self, session_id: Uuid) -> Result<String, ClinicError> {
        let expiration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| (d.as_secs() + self.ttl_secs) as usize)
            .map_err(|e| ClinicError::InternalServerError(format!("Time error: {}", e)))?;

        let claims = Claims {
            sid: session_id,
            exp: expiration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ClinicError::SessionError(format!("JWT encoding error: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, ClinicError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| ClinicError::SessionError(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}
