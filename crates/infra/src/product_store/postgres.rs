//! Postgres-backed product store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | RepositoryError |
//! |------------|----------------------|-----------------|
//! | Database (check constraint violation) | `23514` | `Validation` |
//! | Database (numeric value out of range) | `22003` | `Validation` |
//! | Database (other) | Any other | `Store` |
//! | PoolClosed / PoolTimedOut / Io / Other | N/A | `Store` |
//!
//! Each operation is a single statement, so the store's own transaction
//! scope is the only serialization point.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::instrument;
use uuid::Uuid;

use miniops_core::{DomainError, ProductId};
use miniops_products::{Product, ProductDraft};

use super::r#trait::{ProductRepository, RepositoryError};

const SCHEMA: &str = include_str!("../../migrations/0001_products.sql");

/// Product repository over a `products` table.
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `products` table and its listing index if missing.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self, draft), err)]
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let product = Product::create(draft, ProductId::new(), Utc::now())?;

        // RETURNING gives back what the columns actually stored
        // (microsecond timestamps).
        let row = sqlx::query(
            r#"
            INSERT INTO products (id, name, price, stock, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, price, stock, created_at
            "#,
        )
        .bind(product.id_typed().as_uuid())
        .bind(product.name())
        .bind(product.price())
        .bind(product.stock())
        .bind(product.created_at())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        let stored = product_from_row(&row)?;
        tracing::info!(product_id = %stored.id_typed(), "product created");
        Ok(stored)
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price, stock, created_at
            FROM products
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, RepositoryError> {
    let decode = |e: sqlx::Error| map_sqlx_error("decode", e);

    let id: Uuid = row.try_get("id").map_err(decode)?;
    let name: String = row.try_get("name").map_err(decode)?;
    let price: Decimal = row.try_get("price").map_err(decode)?;
    let stock: i32 = row.try_get("stock").map_err(decode)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(decode)?;

    Ok(Product::restore(ProductId::from_uuid(id), name, price, stock, created_at))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23514") | Some("22003") => {
                    RepositoryError::Validation(DomainError::validation(msg))
                }
                _ => RepositoryError::Store(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::Store(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            RepositoryError::Store(format!("timed out acquiring a connection in {}", operation))
        }
        other => RepositoryError::Store(format!("{} failed: {}", operation, other)),
    }
}
