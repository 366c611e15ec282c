//! Stock records and change notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storeflow_core::ProductId;

/// The quantity-on-hand entry for one product.
///
/// `quantity` is stored as `i64` but the ledger never commits a negative
/// value; rejection happens before the write, not as post-hoc correction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl StockRecord {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// What caused a stock change.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCause {
    Upsert,
    Purchase,
}

impl ChangeCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeCause::Upsert => "upsert",
            ChangeCause::Purchase => "purchase",
        }
    }
}

/// Record of one committed stock mutation, emitted after the commit.
///
/// `previous_quantity` is `None` when the mutation created the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub product_id: ProductId,
    pub previous_quantity: Option<i64>,
    pub new_quantity: i64,
    pub delta: i64,
    pub cause: ChangeCause,
    pub occurred_at: DateTime<Utc>,
}

/// Sink for change records (logging, metrics, downstream notification).
///
/// Emission is fire-and-forget: implementations must not fail the mutation
/// that produced the record, so `emit` is infallible by contract.
pub trait ChangeSink: Send + Sync {
    fn emit(&self, record: &ChangeRecord);
}

impl<S> ChangeSink for std::sync::Arc<S>
where
    S: ChangeSink + ?Sized,
{
    fn emit(&self, record: &ChangeRecord) {
        (**self).emit(record)
    }
}

/// Default sink: structured `inventory.changed` log line.
#[derive(Debug, Default)]
pub struct TracingChangeSink;

impl ChangeSink for TracingChangeSink {
    fn emit(&self, record: &ChangeRecord) {
        tracing::info!(
            product_id = %record.product_id,
            previous_quantity = ?record.previous_quantity,
            new_quantity = record.new_quantity,
            delta = record.delta,
            cause = record.cause.as_str(),
            "inventory.changed"
        );
    }
}
