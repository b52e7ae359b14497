use std::env;
use std::net::SocketAddr;

use anyhow::Context;

/// Runtime settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub bind_addr: SocketAddr,
    pub token_ttl_minutes: u64,
}

impl Config {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| "secret".to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
        let bind_addr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("invalid HOST/PORT: {host}:{port}"))?;

        let token_ttl_minutes = match env::var("TOKEN_TTL_MINUTES") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid TOKEN_TTL_MINUTES: {raw}"))?,
            Err(_) => 30,
        };

        Ok(Self {
            database_url,
            secret_key,
            bind_addr,
            token_ttl_minutes,
        })
    }

    /// Settings for tests and local tooling; never reads the environment.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            secret_key: "secret".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            token_ttl_minutes: 30,
        }
    }
}
