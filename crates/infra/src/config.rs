//! Process configuration, read from environment variables.

use std::net::SocketAddr;

use anyhow::{Context, bail};

pub const DEV_SIGNING_KEY: &str = "miniops-dev-signing-key-change-me-0123456789";

/// Everything the binary needs to wire the service.
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Postgres connection string; `None` runs on the in-memory store.
    pub database_url: Option<String>,
    pub jwt_key: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub token_ttl_secs: i64,
    pub clock_skew_secs: i64,
    pub admin_email: String,
    pub admin_password: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = var("MINIOPS_BIND_ADDR", "0.0.0.0:8080")
            .parse()
            .context("MINIOPS_BIND_ADDR must be a socket address")?;

        let jwt_key = match lookup("JWT_KEY") {
            Some(key) => key,
            None => {
                tracing::warn!("JWT_KEY not set; using insecure dev default");
                DEV_SIGNING_KEY.to_string()
            }
        };
        if jwt_key.len() < 32 {
            bail!("JWT_KEY must be at least 32 bytes for HS256");
        }

        let token_ttl_secs: i64 = var("MINIOPS_TOKEN_TTL_SECS", "60")
            .parse()
            .context("MINIOPS_TOKEN_TTL_SECS must be an integer")?;
        if token_ttl_secs <= 0 {
            bail!("MINIOPS_TOKEN_TTL_SECS must be positive");
        }

        let clock_skew_secs: i64 = var("MINIOPS_CLOCK_SKEW_SECS", "30")
            .parse()
            .context("MINIOPS_CLOCK_SKEW_SECS must be an integer")?;
        if clock_skew_secs < 0 {
            bail!("MINIOPS_CLOCK_SKEW_SECS must not be negative");
        }

        let cors_origins = var("MINIOPS_CORS_ORIGINS", "http://localhost:5173,http://127.0.0.1:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            bind_addr,
            database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            jwt_key,
            jwt_issuer: var("JWT_ISSUER", "miniops"),
            jwt_audience: var("JWT_AUDIENCE", "miniops-web"),
            token_ttl_secs,
            clock_skew_secs,
            admin_email: var("MINIOPS_ADMIN_EMAIL", "admin@miniops.local"),
            admin_password: var("MINIOPS_ADMIN_PASSWORD", "123456"),
            cors_origins,
        })
    }
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("jwt_key", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("clock_skew_secs", &self.clock_skew_secs)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"<redacted>")
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}
