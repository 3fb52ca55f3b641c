use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};

use miniops_core::ProductId;
use miniops_products::Product;

use crate::app::dto::CreateProductRequest;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let items = services.products.list().await?;
    Ok(Json(items))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let product = services.products.create(body.into()).await?;

    tracing::info!(
        product_id = %product.id_typed(),
        subject = principal.subject(),
        "product created"
    );

    let location = format!("/api/products/{}", product.id_typed());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(product)))
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    // A malformed id cannot name an existing product.
    let id: ProductId = id
        .parse()
        .map_err(|_| ApiError::NotFound("product not found".to_string()))?;

    services.products.delete(id).await?;

    tracing::info!(product_id = %id, subject = principal.subject(), "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
