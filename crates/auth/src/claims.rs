use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roles::Role;
use crate::subject::{Subject, SubjectId, lenient_role};

/// Access-token claims (transport-agnostic).
///
/// This is the attribute set coursekit expects once a token has been decoded
/// and signature-checked by the verifier in use. Attribute decoding is
/// lenient to match the evaluator's failure semantics: an unknown role and
/// absent attributes fall back to the guest baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject identifier.
    pub sub: SubjectId,

    /// Role granted to the subject.
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Role,

    /// Whether the subject holds a paid subscription.
    #[serde(default)]
    pub is_paid: bool,

    /// Recorded activity events for the subject.
    #[serde(default)]
    pub activity_count: u32,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl AccessClaims {
    /// The attribute set permission decisions are made from.
    pub fn subject(&self) -> Subject {
        Subject {
            role: self.role,
            is_paid: self.is_paid,
            activity_count: self.activity_count,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate token claims against `now`.
///
/// Note: this validates the *claims* only. Signature verification and
/// decoding are the verifier's job.
pub fn validate_claims(
    claims: &AccessClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
