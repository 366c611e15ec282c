//! Stock ledger port.
//!
//! The ledger is the sole owner of stock record storage and the component
//! responsible for the no-lost-update guarantee: mutations for one product
//! never interleave their read-modify-write, mutations for different
//! products never block each other.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storeflow_core::ProductId;

use crate::stock::StockRecord;

/// Ledger-level failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No stock record exists for the product.
    #[error("no stock record for product {0}")]
    NotFound(ProductId),

    /// The delta would take the quantity below zero. State is unchanged.
    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The underlying store failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl LedgerError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// One page of stock records, ordered by ascending product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPage {
    pub records: Vec<StockRecord>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl StockPage {
    pub fn new(records: Vec<StockRecord>, page_number: u64, page_size: u64, total_elements: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_elements.div_ceil(page_size)
        };
        Self {
            records,
            page_number,
            page_size,
            total_elements,
            total_pages,
        }
    }
}

/// Keyed store for stock records.
///
/// Implementations must serialize `upsert`/`apply_delta` per product id and
/// must enforce the non-negativity invariant inside `apply_delta` before
/// committing. `page` ordering is stable across calls with unchanged data.
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Read the current record, [`LedgerError::NotFound`] when absent.
    async fn read(&self, product_id: ProductId) -> Result<StockRecord, LedgerError>;

    /// Unconditionally write `quantity`, returning the committed record and
    /// the prior quantity (`None` when this call created the record).
    async fn upsert(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(StockRecord, Option<i64>), LedgerError>;

    /// Commit `current + delta` only when the result is non-negative;
    /// otherwise reject without mutating state.
    async fn apply_delta(&self, product_id: ProductId, delta: i64)
        -> Result<StockRecord, LedgerError>;

    /// Page through records ordered by ascending product id (0-based page).
    async fn page(&self, page_number: u64, page_size: u64) -> Result<StockPage, LedgerError>;
}

#[async_trait]
impl<L> StockLedger for std::sync::Arc<L>
where
    L: StockLedger + ?Sized,
{
    async fn read(&self, product_id: ProductId) -> Result<StockRecord, LedgerError> {
        (**self).read(product_id).await
    }

    async fn upsert(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(StockRecord, Option<i64>), LedgerError> {
        (**self).upsert(product_id, quantity).await
    }

    async fn apply_delta(
        &self,
        product_id: ProductId,
        delta: i64,
    ) -> Result<StockRecord, LedgerError> {
        (**self).apply_delta(product_id, delta).await
    }

    async fn page(&self, page_number: u64, page_size: u64) -> Result<StockPage, LedgerError> {
        (**self).page(page_number, page_size).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_page_rounds_total_pages_up() {
        let page = StockPage::new(vec![], 0, 10, 21);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn stock_page_with_zero_size_has_zero_pages() {
        let page = StockPage::new(vec![], 0, 0, 5);
        assert_eq!(page.total_pages, 0);
    }
}
