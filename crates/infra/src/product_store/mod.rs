//! Product persistence boundary.
//!
//! `ProductRepository` is the only way the API touches stored products. Two
//! implementations exist: an in-memory map for tests and database-less runs,
//! and a Postgres-backed store.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryProductRepository;
pub use postgres::PostgresProductRepository;
pub use r#trait::{ProductRepository, RepositoryError};
