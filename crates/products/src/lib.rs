//! Products domain module.
//!
//! Business rules for the product catalog as plain deterministic logic
//! (no IO, no HTTP, no storage).

pub mod product;

pub use product::{Product, ProductDraft, newest_first};
