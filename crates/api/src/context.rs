use miniops_auth::{AccessClaims, Role};

/// Principal context for a request (authenticated subject + roles).
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    subject: String,
    roles: Vec<Role>,
}

impl PrincipalContext {
    pub fn new(subject: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            subject: subject.into(),
            roles,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}

impl From<AccessClaims> for PrincipalContext {
    fn from(claims: AccessClaims) -> Self {
        Self::new(claims.sub, claims.roles)
    }
}
