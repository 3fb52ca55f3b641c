use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// Claims carried by an access token.
///
/// Field names follow the registered JWT claim names so issuer and audience
/// can be checked by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the verified identity.
    pub sub: String,

    /// Display name (same as the subject for the admin identity).
    pub name: String,

    /// Roles granted to the subject.
    #[serde(rename = "role")]
    pub roles: Vec<Role>,

    pub iss: String,
    pub aud: String,

    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,

    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl AccessClaims {
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token signature is invalid")]
    BadSignature,

    #[error("token issuer does not match")]
    IssuerMismatch,

    #[error("token audience does not match")]
    AudienceMismatch,

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Check the time window of already-verified claims.
///
/// `clock_skew_secs` is tolerated on both ends: a token is still accepted up
/// to that many seconds after `exp`, and an `iat` up to that many seconds in
/// the future is not rejected.
pub fn validate_claims(
    claims: &AccessClaims,
    now: DateTime<Utc>,
    clock_skew_secs: i64,
) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now + clock_skew_secs < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now > claims.exp + clock_skew_secs {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
