use std::sync::Arc;

use anyhow::Context;

use storeflow_api::app::{build_app, AppServices};
use storeflow_api::config::ApiConfig;
use storeflow_infra::PostgresStockLedger;
use storeflow_inventory::{
    ChangeSink, InMemoryStockLedger, ProductValidator, StockLedger, TracingChangeSink,
};
use storeflow_products_client::{HttpProductsClient, RetryingValidator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storeflow_observability::init();

    let config = ApiConfig::from_env();

    let checker = HttpProductsClient::new(&config.products)
        .context("failed to build products service client")?;
    let validator: Arc<dyn ProductValidator> = Arc::new(RetryingValidator::new(checker));

    let ledger: Arc<dyn StockLedger> = match &config.database_url {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .connect(url)
                .await
                .context("failed to connect to database")?;
            let ledger = PostgresStockLedger::new(pool);
            ledger
                .ensure_schema()
                .await
                .context("failed to prepare database schema")?;
            Arc::new(ledger)
        }
        None => Arc::new(InMemoryStockLedger::new()),
    };

    let sink: Arc<dyn ChangeSink> = Arc::new(TracingChangeSink);

    let app = build_app(AppServices::new(validator, ledger, sink));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
