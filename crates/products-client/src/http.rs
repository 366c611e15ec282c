//! HTTP implementation of the existence check.

use async_trait::async_trait;
use reqwest::StatusCode;

use storeflow_core::ProductId;

use crate::check::{ProductCheck, ProductExistenceChecker};
use crate::config::ProductsClientConfig;

/// Existence check against `GET {base_url}/api/v1/products/{id}`, sent with
/// the shared `X-API-KEY` secret. One request per call, no retrying here.
pub struct HttpProductsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpProductsClient {
    pub fn new(config: &ProductsClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn product_url(&self, product_id: ProductId) -> String {
        format!("{}/api/v1/products/{}", self.base_url, product_id)
    }
}

#[async_trait]
impl ProductExistenceChecker for HttpProductsClient {
    async fn check(&self, product_id: ProductId) -> ProductCheck {
        let response = self
            .client
            .get(self.product_url(product_id))
            .header("X-API-KEY", &self.api_key)
            .send()
            .await;

        match response {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => ProductCheck::NotFound,
            Ok(response) if response.status().is_success() => ProductCheck::Exists,
            Ok(response) => ProductCheck::Transient(format!(
                "unexpected status calling products service: {}",
                response.status()
            )),
            // Connect failure, timeout, protocol error.
            Err(err) => ProductCheck::Transient(err.to_string()),
        }
    }
}
