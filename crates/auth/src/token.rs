//! HS256 access tokens.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::Serialize;
use thiserror::Error;

use crate::{AccessClaims, ClaimsProvider, CredentialVerifier, Identity, TokenValidationError, validate_claims};

pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60;
pub const DEFAULT_CLOCK_SKEW_SECS: i64 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenValidationError),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Signing material and token lifetime settings.
#[derive(Clone)]
pub struct TokenConfig {
    signing_key: Vec<u8>,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
    pub clock_skew: Duration,
}

impl TokenConfig {
    pub fn new(signing_key: impl Into<Vec<u8>>, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            clock_skew: Duration::seconds(DEFAULT_CLOCK_SKEW_SECS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_clock_skew(mut self, clock_skew: Duration) -> Self {
        self.clock_skew = clock_skew;
        self
    }
}

impl core::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("signing_key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl", &self.ttl)
            .field("clock_skew", &self.clock_skew)
            .finish()
    }
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Validates presented bearer tokens.
///
/// `now` is passed in so callers (and tests) control the clock.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, AuthError>;
}

/// Issues and validates access tokens for verified identities.
///
/// Stateless: there is no revocation list and no refresh; a token simply
/// stops validating once its expiry (plus clock skew) has passed.
pub struct TokenService {
    config: TokenConfig,
    verifier: Arc<dyn CredentialVerifier>,
    claims: Arc<dyn ClaimsProvider>,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(
        config: TokenConfig,
        verifier: Arc<dyn CredentialVerifier>,
        claims: Arc<dyn ClaimsProvider>,
    ) -> Self {
        let encoding = EncodingKey::from_secret(&config.signing_key);
        let decoding = DecodingKey::from_secret(&config.signing_key);
        Self {
            config,
            verifier,
            claims,
            encoding,
            decoding,
        }
    }

    /// Verify credentials and sign a token for the resulting identity.
    pub async fn issue(&self, identity: &str, secret: &str) -> Result<IssuedToken, AuthError> {
        let verified = match self.verifier.verify(identity, secret).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(identity = %identity, "login rejected");
                return Err(e);
            }
        };
        let token = self.sign(&verified, Utc::now())?;
        tracing::info!(subject = %verified, expires_at = %token.expires_at, "access token issued");
        Ok(token)
    }

    /// Sign a token for an already-verified identity as of `now`.
    pub fn sign(&self, identity: &Identity, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let expires_at = now + self.config.ttl;
        let claims = AccessClaims {
            sub: identity.subject().to_string(),
            name: identity.subject().to_string(),
            roles: self.claims.roles_for(identity),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let access_token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }

    fn decoder_validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time checks run in `validate_claims` against the caller's clock.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_audience(&[self.config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation
    }
}

impl TokenValidator for TokenService {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, AuthError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &self.decoder_validation())
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenValidationError::BadSignature,
                ErrorKind::InvalidIssuer => TokenValidationError::IssuerMismatch,
                ErrorKind::InvalidAudience => TokenValidationError::AudienceMismatch,
                ErrorKind::ExpiredSignature => TokenValidationError::Expired,
                other => TokenValidationError::Malformed(format!("{other:?}")),
            })?;

        validate_claims(&data.claims, now, self.config.clock_skew.num_seconds())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedRoleProvider, Role, StaticCredentialVerifier};

    const KEY: &[u8] = b"test-signing-key-that-is-long-enough!";

    fn service_with(config: TokenConfig) -> TokenService {
        TokenService::new(
            config,
            Arc::new(StaticCredentialVerifier::new("admin@miniops.local", "123456")),
            Arc::new(FixedRoleProvider::admin()),
        )
    }

    fn service() -> TokenService {
        service_with(TokenConfig::new(KEY, "miniops", "miniops-web"))
    }

    #[tokio::test]
    async fn issue_with_wrong_credentials_fails() {
        let err = service().issue("admin@miniops.local", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn issued_token_validates_immediately() {
        let svc = service();
        let issued = svc.issue("admin@miniops.local", "123456").await.unwrap();

        let claims = svc.validate(&issued.access_token, Utc::now()).unwrap();
        assert_eq!(claims.sub, "admin@miniops.local");
        assert_eq!(claims.iss, "miniops");
        assert_eq!(claims.aud, "miniops-web");
        assert!(claims.has_role(&Role::ADMIN));
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_SECS);
    }

    #[tokio::test]
    async fn issued_token_is_rejected_after_expiry_and_skew() {
        let svc = service();
        let issued = svc.issue("admin@miniops.local", "123456").await.unwrap();

        let later = issued.expires_at + Duration::seconds(DEFAULT_CLOCK_SKEW_SECS + 1);
        let err = svc.validate(&issued.access_token, later).unwrap_err();
        assert_eq!(err, AuthError::InvalidToken(TokenValidationError::Expired));

        let within_skew = issued.expires_at + Duration::seconds(DEFAULT_CLOCK_SKEW_SECS - 1);
        assert!(svc.validate(&issued.access_token, within_skew).is_ok());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let svc = service();
        let issued = svc.sign(&Identity::new("admin@miniops.local"), Utc::now()).unwrap();

        let mut parts: Vec<String> = issued.access_token.split('.').map(str::to_string).collect();
        let sig = parts[2].clone();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        parts[2] = format!("{flipped}{}", &sig[1..]);
        let tampered = parts.join(".");

        let err = svc.validate(&tampered, Utc::now()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let other = service_with(TokenConfig::new(b"a-completely-different-signing-key".to_vec(), "miniops", "miniops-web"));
        let issued = other.sign(&Identity::new("admin@miniops.local"), Utc::now()).unwrap();

        let err = service().validate(&issued.access_token, Utc::now()).unwrap_err();
        assert_eq!(err, AuthError::InvalidToken(TokenValidationError::BadSignature));
    }

    #[test]
    fn issuer_and_audience_must_match() {
        let foreign_issuer = service_with(TokenConfig::new(KEY, "someone-else", "miniops-web"));
        let issued = foreign_issuer.sign(&Identity::new("admin@miniops.local"), Utc::now()).unwrap();
        assert_eq!(
            service().validate(&issued.access_token, Utc::now()).unwrap_err(),
            AuthError::InvalidToken(TokenValidationError::IssuerMismatch)
        );

        let foreign_audience = service_with(TokenConfig::new(KEY, "miniops", "another-app"));
        let issued = foreign_audience.sign(&Identity::new("admin@miniops.local"), Utc::now()).unwrap();
        assert_eq!(
            service().validate(&issued.access_token, Utc::now()).unwrap_err(),
            AuthError::InvalidToken(TokenValidationError::AudienceMismatch)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        let err = service().validate("not.a.jwt", Utc::now()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(TokenValidationError::Malformed(_))));
    }

    #[test]
    fn ttl_is_configurable() {
        let svc = service_with(TokenConfig::new(KEY, "miniops", "miniops-web").with_ttl(Duration::minutes(15)));
        let now = Utc::now();
        let issued = svc.sign(&Identity::new("admin@miniops.local"), now).unwrap();
        let claims = svc.validate(&issued.access_token, now).unwrap();
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn config_debug_hides_signing_key() {
        let rendered = format!("{:?}", TokenConfig::new(KEY, "miniops", "miniops-web"));
        assert!(!rendered.contains("test-signing-key"));
    }
}
