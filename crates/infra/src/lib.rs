//! Infrastructure layer: product persistence, database pool, configuration.

pub mod config;
pub mod db;
pub mod product_store;

pub use config::AppConfig;
pub use product_store::{
    InMemoryProductRepository, PostgresProductRepository, ProductRepository, RepositoryError,
};
