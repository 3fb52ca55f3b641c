//! `miniops-core` — domain building blocks shared by every crate.
//!
//! Pure types only: identifiers and the domain error model.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
