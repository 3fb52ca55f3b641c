//! Request/response bodies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use miniops_products::ProductDraft;

/// Missing fields decode as empty strings, which never match a credential.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
}

impl From<CreateProductRequest> for ProductDraft {
    fn from(body: CreateProductRequest) -> Self {
        ProductDraft::new(body.name, body.price, body.stock)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WhoAmIResponse {
    pub sub: String,
    pub roles: Vec<String>,
}
