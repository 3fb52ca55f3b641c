use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use miniops_core::{DomainError, DomainResult, ProductId};

/// Unvalidated input for a new product, as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Decimal, stock: i32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }
}

/// Catalog entry.
///
/// Products are immutable once created: there is no update path, only
/// creation and deletion. Serializes to the wire shape
/// `{id, name, price, stock, createdAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    stock: i32,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Validate a draft and mint the product it describes.
    ///
    /// The name is trimmed and must be non-empty; price and stock must be
    /// non-negative.
    pub fn create(draft: ProductDraft, id: ProductId, now: DateTime<Utc>) -> DomainResult<Self> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if draft.price < Decimal::ZERO {
            return Err(DomainError::validation("price must be >= 0"));
        }
        if draft.stock < 0 {
            return Err(DomainError::validation("stock must be >= 0"));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            price: draft.price,
            stock: draft.stock,
            created_at: now,
        })
    }

    /// Rebuild a product from trusted storage (no validation).
    pub fn restore(
        id: ProductId,
        name: String,
        price: Decimal,
        stock: i32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            price,
            stock,
            created_at,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock(&self) -> i32 {
        self.stock
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Catalog listing order: newest first, ties broken by id (also newest first).
pub fn newest_first(a: &Product, b: &Product) -> core::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
