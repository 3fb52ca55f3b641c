//! `miniops-auth` — bearer token issuance and validation.
//!
//! Decoupled from HTTP and storage: credentials are checked through
//! [`CredentialVerifier`], roles come from [`ClaimsProvider`], and signing
//! material is an explicit [`TokenConfig`].

pub mod claims;
pub mod identity;
pub mod roles;
pub mod token;

pub use claims::{AccessClaims, TokenValidationError, validate_claims};
pub use identity::{CredentialVerifier, Identity, StaticCredentialVerifier};
pub use roles::{ClaimsProvider, FixedRoleProvider, Role};
pub use token::{AuthError, IssuedToken, TokenConfig, TokenService, TokenValidator};
