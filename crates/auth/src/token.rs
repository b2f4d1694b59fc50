//! Token verification seam.
//!
//! Transports depend on the [`TokenVerifier`] trait, never on a concrete
//! verifier, so identity resolution is injected rather than read from a
//! process-wide client.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::claims::{AccessClaims, TokenValidationError, validate_claims};

/// Verifies an encoded access token and returns its claims.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenVerifyError>;
}

#[derive(Debug, Error)]
pub enum TokenVerifyError {
    /// The token is malformed or its signature does not verify.
    #[error("token rejected: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// The signature verified but the claims window is invalid.
    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// HS256 shared-secret verifier.
pub struct Hs256TokenVerifier {
    key: DecodingKey,
}

impl Hs256TokenVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

impl TokenVerifier for Hs256TokenVerifier {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenVerifyError> {
        // The time window is carried as RFC 3339 claims and validated below,
        // not as numeric registered claims.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.key, &validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};

    use super::*;
    use crate::roles::Role;
    use crate::subject::SubjectId;

    fn encode(claims: &AccessClaims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(expires_in: Duration) -> AccessClaims {
        let now = Utc::now();
        AccessClaims {
            sub: SubjectId::new(),
            role: Role::Paid,
            is_paid: true,
            activity_count: 5,
            issued_at: now - Duration::minutes(1),
            expires_at: now + expires_in,
        }
    }

    #[test]
    fn round_trips_a_signed_token() {
        let claims = claims(Duration::minutes(10));
        let token = encode(&claims, "secret");

        let verifier = Hs256TokenVerifier::new("secret");
        let decoded = verifier.verify(&token, Utc::now()).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let token = encode(&claims(Duration::minutes(10)), "secret-a");

        let verifier = Hs256TokenVerifier::new("secret-b");
        let result = verifier.verify(&token, Utc::now());
        assert!(matches!(result, Err(TokenVerifyError::Invalid(_))));
    }

    #[test]
    fn rejects_an_expired_token() {
        let token = encode(&claims(-Duration::seconds(30)), "secret");

        let verifier = Hs256TokenVerifier::new("secret");
        let result = verifier.verify(&token, Utc::now());
        assert!(matches!(
            result,
            Err(TokenVerifyError::Claims(TokenValidationError::Expired))
        ));
    }

    #[test]
    fn rejects_garbage_tokens() {
        let verifier = Hs256TokenVerifier::new("secret");
        let result = verifier.verify("definitely-not-a-jwt", Utc::now());
        assert!(matches!(result, Err(TokenVerifyError::Invalid(_))));
    }
}
