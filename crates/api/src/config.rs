//! Configuration loading and representation.

use std::time::Duration;

use storeflow_products_client::ProductsClientConfig;

/// Service configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    /// When unset the service runs on the in-memory ledger (dev mode).
    pub database_url: Option<String>,
    pub products: ProductsClientConfig,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let database_url = std::env::var("DATABASE_URL").ok();
        if database_url.is_none() {
            tracing::warn!("DATABASE_URL not set; using in-memory stock ledger");
        }

        let base_url = std::env::var("PRODUCTS_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8081".to_string());
        let api_key = std::env::var("PRODUCTS_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("PRODUCTS_API_KEY not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let products = ProductsClientConfig::new(base_url, api_key).with_timeouts(
            duration_from_env("PRODUCTS_CONNECT_TIMEOUT_MS", 2000),
            duration_from_env("PRODUCTS_READ_TIMEOUT_MS", 2000),
        );

        Self {
            bind_addr,
            database_url,
            products,
        }
    }
}

fn duration_from_env(var: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}
