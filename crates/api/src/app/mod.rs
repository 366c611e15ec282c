//! Application wiring: services and router assembly.

use std::sync::Arc;

use axum::extract::Extension;
use axum::Router;

use storeflow_inventory::{ChangeSink, InventoryService, ProductValidator, StockLedger};

pub mod dto;
pub mod errors;
pub mod routes;

/// Type-erased orchestrator handle shared across request handlers.
pub type SharedInventoryService =
    InventoryService<Arc<dyn ProductValidator>, Arc<dyn StockLedger>, Arc<dyn ChangeSink>>;

/// Dependency container for the HTTP layer.
#[derive(Clone)]
pub struct AppServices {
    inventory: Arc<SharedInventoryService>,
}

impl AppServices {
    pub fn new(
        validator: Arc<dyn ProductValidator>,
        ledger: Arc<dyn StockLedger>,
        sink: Arc<dyn ChangeSink>,
    ) -> Self {
        Self {
            inventory: Arc::new(InventoryService::new(validator, ledger, sink)),
        }
    }

    pub fn inventory(&self) -> &SharedInventoryService {
        &self.inventory
    }
}

/// Build the full application router.
pub fn build_app(services: AppServices) -> Router {
    Router::new()
        .nest("/api/v1/inventories", routes::inventories::router())
        .merge(routes::system::router())
        .layer(Extension(Arc::new(services)))
}
