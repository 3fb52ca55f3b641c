use std::sync::Arc;

use anyhow::Context;

use miniops_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    miniops_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(?config, "starting miniops-api");
    if config.token_ttl_secs <= 60 {
        tracing::warn!(
            ttl_secs = config.token_ttl_secs,
            "access tokens expire within a minute; set MINIOPS_TOKEN_TTL_SECS to lengthen sessions"
        );
    }

    let services = Arc::new(miniops_api::app::build_services(&config).await?);
    let app = miniops_api::app::build_app(services, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
