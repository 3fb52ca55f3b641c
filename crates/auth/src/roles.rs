use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Identity;

/// Role identifier carried in the `role` claim.
///
/// Roles are opaque strings at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// The single administrative role granted to the catalog operator.
    pub const ADMIN: Role = Role(Cow::Borrowed("Admin"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the roles embedded in an issued token.
pub trait ClaimsProvider: Send + Sync {
    fn roles_for(&self, identity: &Identity) -> Vec<Role>;
}

/// Grants the same role set to every verified identity.
#[derive(Debug, Clone)]
pub struct FixedRoleProvider {
    roles: Vec<Role>,
}

impl FixedRoleProvider {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    /// Every identity is an `Admin`.
    pub fn admin() -> Self {
        Self::new(vec![Role::ADMIN])
    }
}

impl ClaimsProvider for FixedRoleProvider {
    fn roles_for(&self, _identity: &Identity) -> Vec<Role> {
        self.roles.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_provider_grants_admin_role() {
        let provider = FixedRoleProvider::admin();
        let roles = provider.roles_for(&Identity::new("someone@example.com"));
        assert_eq!(roles, vec![Role::new("Admin")]);
    }

    #[test]
    fn role_serializes_as_plain_string() {
        let json = serde_json::to_string(&Role::ADMIN).unwrap();
        assert_eq!(json, "\"Admin\"");
    }
}
