//! Credential verification.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// A verified caller identity (the token subject).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }

    pub fn subject(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks a presented identity/secret pair.
///
/// Implementations return [`AuthError::InvalidCredentials`] on any mismatch
/// and must not reveal which half was wrong.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, identity: &str, secret: &str) -> Result<Identity, AuthError>;
}

/// A single configured credential pair, compared exactly (case-sensitive).
#[derive(Clone)]
pub struct StaticCredentialVerifier {
    identity: String,
    secret: String,
}

impl StaticCredentialVerifier {
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }
}

impl core::fmt::Debug for StaticCredentialVerifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StaticCredentialVerifier")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, identity: &str, secret: &str) -> Result<Identity, AuthError> {
        // Both halves are always compared.
        let identity_ok = identity == self.identity;
        let secret_ok = secret == self.secret;
        if identity_ok & secret_ok {
            Ok(Identity::new(identity))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
