use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
};

use crate::app::dto::{LoginRequest, LoginResponse, WhoAmIResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Login answers only 200 or 401, whatever the body looks like.
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "undecodable login body");
        ApiError::Unauthorized
    })?;
    let issued = services.tokens.issue(&body.email, &body.password).await?;

    Ok(Json(LoginResponse {
        access_token: issued.access_token,
    }))
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse {
        sub: principal.subject().to_string(),
        roles: principal.roles().iter().map(|r| r.as_str().to_string()).collect(),
    })
}
