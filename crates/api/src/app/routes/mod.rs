use axum::{
    Router,
    routing::{delete, get},
};

pub mod auth;
pub mod products;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/api/auth/me", get(auth::whoami))
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/products/:id", delete(products::delete_product))
}
