//! In-memory stock ledger.
//!
//! Per-key exclusion via a lock table: the outer map is only locked long
//! enough to look up (or create) a product's entry, then released; the
//! read-modify-write itself happens under that entry's own mutex. Mutations
//! on different products proceed independently.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;

use storeflow_core::ProductId;

use crate::ledger::{LedgerError, StockLedger, StockPage};
use crate::stock::StockRecord;

/// In-memory ledger for tests, development, and single-node deployments.
///
/// `BTreeMap` keeps paging deterministic (ascending product id).
#[derive(Debug, Default)]
pub struct InMemoryStockLedger {
    entries: RwLock<BTreeMap<ProductId, Arc<Mutex<i64>>>>,
}

impl InMemoryStockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, product_id: ProductId) -> Result<Option<Arc<Mutex<i64>>>, LedgerError> {
        let map = self
            .entries
            .read()
            .map_err(|_| LedgerError::storage("stock ledger lock poisoned"))?;
        Ok(map.get(&product_id).cloned())
    }
}

#[async_trait]
impl StockLedger for InMemoryStockLedger {
    async fn read(&self, product_id: ProductId) -> Result<StockRecord, LedgerError> {
        let entry = self
            .entry(product_id)?
            .ok_or(LedgerError::NotFound(product_id))?;
        let quantity = *entry
            .lock()
            .map_err(|_| LedgerError::storage("stock entry lock poisoned"))?;
        Ok(StockRecord::new(product_id, quantity))
    }

    async fn upsert(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(StockRecord, Option<i64>), LedgerError> {
        let entry = {
            let mut map = self
                .entries
                .write()
                .map_err(|_| LedgerError::storage("stock ledger lock poisoned"))?;
            match map.get(&product_id) {
                Some(existing) => existing.clone(),
                None => {
                    // Creation happens under the map guard so two concurrent
                    // first upserts cannot both insert.
                    map.insert(product_id, Arc::new(Mutex::new(quantity)));
                    return Ok((StockRecord::new(product_id, quantity), None));
                }
            }
        };

        let mut current = entry
            .lock()
            .map_err(|_| LedgerError::storage("stock entry lock poisoned"))?;
        let previous = *current;
        *current = quantity;
        Ok((StockRecord::new(product_id, quantity), Some(previous)))
    }

    async fn apply_delta(
        &self,
        product_id: ProductId,
        delta: i64,
    ) -> Result<StockRecord, LedgerError> {
        let entry = self
            .entry(product_id)?
            .ok_or(LedgerError::NotFound(product_id))?;

        let mut current = entry
            .lock()
            .map_err(|_| LedgerError::storage("stock entry lock poisoned"))?;
        let new_quantity = current
            .checked_add(delta)
            .ok_or_else(|| LedgerError::storage("stock quantity overflow"))?;
        if new_quantity < 0 {
            return Err(LedgerError::InsufficientStock {
                product_id,
                requested: -delta,
                available: *current,
            });
        }
        *current = new_quantity;
        Ok(StockRecord::new(product_id, new_quantity))
    }

    async fn page(&self, page_number: u64, page_size: u64) -> Result<StockPage, LedgerError> {
        let map = self
            .entries
            .read()
            .map_err(|_| LedgerError::storage("stock ledger lock poisoned"))?;

        let total_elements = map.len() as u64;
        let offset = page_number.saturating_mul(page_size);

        let mut records = Vec::new();
        for (product_id, entry) in map
            .iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(page_size).unwrap_or(usize::MAX))
        {
            let quantity = *entry
                .lock()
                .map_err(|_| LedgerError::storage("stock entry lock poisoned"))?;
            records.push(StockRecord::new(*product_id, quantity));
        }

        Ok(StockPage::new(records, page_number, page_size, total_elements))
    }
}
