//! Service wiring: token service and product repository.

use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;

use miniops_auth::{FixedRoleProvider, StaticCredentialVerifier, TokenConfig, TokenService};
use miniops_infra::{
    AppConfig, InMemoryProductRepository, PostgresProductRepository, ProductRepository, db,
};

/// Shared, read-only handles used by every handler.
pub struct AppServices {
    pub tokens: Arc<TokenService>,
    pub products: Arc<dyn ProductRepository>,
}

impl AppServices {
    pub fn new(tokens: Arc<TokenService>, products: Arc<dyn ProductRepository>) -> Self {
        Self { tokens, products }
    }
}

/// Token service for the single configured admin identity.
pub fn token_service(config: &AppConfig) -> TokenService {
    let token_config = TokenConfig::new(
        config.jwt_key.as_bytes().to_vec(),
        config.jwt_issuer.clone(),
        config.jwt_audience.clone(),
    )
    .with_ttl(Duration::seconds(config.token_ttl_secs))
    .with_clock_skew(Duration::seconds(config.clock_skew_secs));

    TokenService::new(
        token_config,
        Arc::new(StaticCredentialVerifier::new(
            config.admin_email.clone(),
            config.admin_password.clone(),
        )),
        Arc::new(FixedRoleProvider::admin()),
    )
}

/// Build services from configuration: Postgres when `DATABASE_URL` is set,
/// otherwise an in-memory store.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let products: Arc<dyn ProductRepository> = match &config.database_url {
        Some(url) => {
            let pool = db::connect(url)
                .await
                .context("failed to connect to DATABASE_URL")?;
            let repo = PostgresProductRepository::new(pool);
            repo.migrate().await.context("failed to apply products schema")?;
            tracing::info!("using postgres product store");
            Arc::new(repo)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; products are kept in memory and lost on restart");
            Arc::new(InMemoryProductRepository::new())
        }
    };

    Ok(AppServices::new(Arc::new(token_service(config)), products))
}
