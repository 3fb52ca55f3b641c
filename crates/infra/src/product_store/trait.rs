use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use miniops_core::{DomainError, ProductId};
use miniops_products::{Product, ProductDraft};

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Input rejected before anything was persisted.
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The backing store failed (connection, constraint, decode, ...).
    #[error("store error: {0}")]
    Store(String),
}

/// CRUD access to stored products.
///
/// There is no update operation: products are created, listed
/// and deleted.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Validate `draft`, then persist it as a new product with a fresh id and
    /// creation timestamp. Nothing is persisted when validation fails.
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError>;

    /// All products, newest first. Recomputed on every call.
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Remove a product. Deleting an unknown (or already deleted) id yields
    /// `NotFound`.
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError>;
}

#[async_trait]
impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        (**self).create(draft).await
    }

    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        (**self).list().await
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        (**self).delete(id).await
    }
}
