//! Inventory domain module: the stock-mutation core.
//!
//! This crate owns stock records and the orchestration of stock mutations:
//! remote product validation happens strictly before ledger access, quantity
//! changes are serialized per product, and the `quantity >= 0` invariant is
//! enforced at the point of mutation.

pub mod ledger;
pub mod memory;
pub mod service;
pub mod stock;
pub mod validation;

pub use ledger::{LedgerError, StockLedger, StockPage};
pub use memory::InMemoryStockLedger;
pub use service::InventoryService;
pub use stock::{ChangeCause, ChangeRecord, ChangeSink, StockRecord, TracingChangeSink};
pub use validation::{ProductValidator, ValidationOutcome};
