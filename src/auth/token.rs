use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::guard::Identity;
use crate::error::{AppError, AuthError};

/// Payload embedded in a session token. Carries identity only, never
/// credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.sub,
            email: self.email.clone(),
        }
    }
}

/// Issues and verifies signed, time-bound session tokens (HS256).
///
/// Holds no state beyond the signing secret and TTL: a token, once issued,
/// stays valid until its embedded expiry. Logout only discards the
/// client-held copy.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: String, token_expiry_hours: i64) -> Self {
        Self {
            secret,
            ttl: Duration::hours(token_expiry_hours),
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.id,
            email: identity.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalError(format!("token signing failed: {}", e)))
    }

    /// Checks signature and expiry, then returns the embedded claims.
    /// The signature covers the full payload, so any altered byte of the
    /// token fails here.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::AuthError(AuthError::TokenExpired)
            }
            jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                AppError::AuthError(AuthError::InvalidSignature)
            }
            _ => AppError::AuthError(AuthError::MalformedToken),
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: "ann@example.com".to_string(),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = TokenService::new("test_secret".to_string(), 24);
        let identity = test_identity();

        let token = service.issue(&identity).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, identity.id);
        assert_eq!(claims.email, identity.email);
        assert_eq!(claims.identity(), identity);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_other_secret_rejected() {
        let issuer = TokenService::new("secret_a".to_string(), 24);
        let verifier = TokenService::new("secret_b".to_string(), 24);

        let token = issuer.issue(&test_identity()).unwrap();
        let result = verifier.verify(&token);

        assert!(matches!(
            result,
            Err(AppError::AuthError(AuthError::InvalidSignature))
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = TokenService::new("test_secret".to_string(), 24);
        let token = service.issue(&test_identity()).unwrap();

        // Flip one character in the payload segment.
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        assert_eq!(parts.len(), 3);
        let payload = parts[1].clone();
        let flipped = if payload.starts_with('A') { "B" } else { "A" };
        parts[1] = format!("{}{}", flipped, &payload[1..]);
        let tampered = parts.join(".");

        let result = service.verify(&tampered);
        assert!(matches!(
            result,
            Err(AppError::AuthError(
                AuthError::InvalidSignature | AuthError::MalformedToken
            ))
        ));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = TokenService::new("test_secret".to_string(), 24);
        let result = service.verify("not-a-token");
        assert!(matches!(
            result,
            Err(AppError::AuthError(AuthError::MalformedToken))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative TTL puts exp in the past, beyond the decoder's leeway.
        let service = TokenService::new("test_secret".to_string(), -2);
        let token = service.issue(&test_identity()).unwrap();

        let result = service.verify(&token);
        assert!(matches!(
            result,
            Err(AppError::AuthError(AuthError::TokenExpired))
        ));
    }
}
