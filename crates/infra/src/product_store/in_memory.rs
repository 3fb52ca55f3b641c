use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use miniops_core::ProductId;
use miniops_products::{Product, ProductDraft, newest_first};

use super::r#trait::{ProductRepository, RepositoryError};

/// In-memory product store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> RepositoryError {
        RepositoryError::Store("in-memory store lock poisoned".to_string())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let product = Product::create(draft, ProductId::new(), Utc::now())?;

        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        map.insert(product.id_typed(), product.clone());
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let map = self.inner.read().map_err(|_| Self::poisoned())?;
        let mut items: Vec<Product> = map.values().cloned().collect();
        items.sort_by(newest_first);
        Ok(items)
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        match map.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(id)),
        }
    }
}
