//! Inventory orchestrator: the public operation surface.
//!
//! Sequencing for mutations is fixed: argument checks first (before any
//! I/O), then remote product validation, then the ledger mutation, then a
//! change-record emission. Validation never runs while a ledger entry is
//! held, so a slow or retrying remote check cannot block unrelated reads
//! and writes. Reads skip validation entirely.

use chrono::Utc;

use storeflow_core::{InventoryError, InventoryResult, ProductId};

use crate::ledger::{LedgerError, StockLedger, StockPage};
use crate::stock::{ChangeCause, ChangeRecord, ChangeSink, StockRecord};
use crate::validation::{ProductValidator, ValidationOutcome};

/// Orchestrates stock mutations against an explicit validator, ledger, and
/// change sink. No ambient context: callers supply every dependency.
pub struct InventoryService<V, L, S> {
    validator: V,
    ledger: L,
    sink: S,
}

impl<V, L, S> InventoryService<V, L, S>
where
    V: ProductValidator,
    L: StockLedger,
    S: ChangeSink,
{
    pub fn new(validator: V, ledger: L, sink: S) -> Self {
        Self {
            validator,
            ledger,
            sink,
        }
    }

    /// Create or fully replace the stock record for a product.
    ///
    /// The product must exist in the remote catalog; `quantity` must be
    /// non-negative.
    pub async fn create_or_update(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> InventoryResult<StockRecord> {
        if quantity < 0 {
            return Err(InventoryError::invalid_argument(
                "quantity must be zero or greater",
            ));
        }

        self.validate_remote(product_id).await?;

        let (record, previous_quantity) = self
            .ledger
            .upsert(product_id, quantity)
            .await
            .map_err(map_ledger_error)?;

        self.emit(ChangeRecord {
            product_id,
            previous_quantity,
            new_quantity: record.quantity,
            delta: record.quantity - previous_quantity.unwrap_or(0),
            cause: ChangeCause::Upsert,
            occurred_at: Utc::now(),
        });

        Ok(record)
    }

    /// Decrement stock for a purchase. `quantity` must be strictly positive;
    /// a purchase of zero is a contract violation, not a no-op.
    pub async fn purchase(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> InventoryResult<StockRecord> {
        if quantity <= 0 {
            return Err(InventoryError::invalid_argument(
                "quantity must be greater than zero",
            ));
        }

        self.validate_remote(product_id).await?;

        let record = self
            .ledger
            .apply_delta(product_id, -quantity)
            .await
            .map_err(map_ledger_error)?;

        self.emit(ChangeRecord {
            product_id,
            previous_quantity: Some(record.quantity + quantity),
            new_quantity: record.quantity,
            delta: -quantity,
            cause: ChangeCause::Purchase,
            occurred_at: Utc::now(),
        });

        Ok(record)
    }

    /// Read the stock record for a product. No remote validation: reading
    /// does not require re-confirming upstream existence.
    pub async fn find_by_product_id(&self, product_id: ProductId) -> InventoryResult<StockRecord> {
        self.ledger
            .read(product_id)
            .await
            .map_err(map_ledger_error)
    }

    /// List stock records, 0-based pages ordered by ascending product id.
    /// A page size of zero yields an empty page, not an error.
    pub async fn find_page(&self, page_number: i64, page_size: i64) -> InventoryResult<StockPage> {
        if page_number < 0 {
            return Err(InventoryError::invalid_argument(
                "page number must be zero or greater",
            ));
        }
        if page_size < 0 {
            return Err(InventoryError::invalid_argument(
                "page size must be zero or greater",
            ));
        }

        self.ledger
            .page(page_number as u64, page_size as u64)
            .await
            .map_err(map_ledger_error)
    }

    async fn validate_remote(&self, product_id: ProductId) -> InventoryResult<()> {
        match self.validator.validate(product_id).await {
            ValidationOutcome::Exists => Ok(()),
            ValidationOutcome::NotFound(id) => Err(InventoryError::RemoteProductNotFound(id)),
            ValidationOutcome::Unavailable {
                attempts,
                last_cause,
            } => Err(InventoryError::UpstreamUnavailable {
                attempts,
                last_cause,
            }),
        }
    }

    fn emit(&self, record: ChangeRecord) {
        // Fire-and-forget: the sink contract is infallible, failures inside
        // an implementation must never fail the committed mutation.
        self.sink.emit(&record);
    }
}

fn map_ledger_error(err: LedgerError) -> InventoryError {
    match err {
        LedgerError::NotFound(id) => InventoryError::InventoryNotFound(id),
        LedgerError::InsufficientStock {
            product_id,
            requested,
            available,
        } => InventoryError::InsufficientStock {
            product_id,
            requested,
            available,
        },
        LedgerError::Storage(msg) => InventoryError::StorageFailure(msg),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::memory::InMemoryStockLedger;

    /// Validator stub with a fixed outcome and a call counter.
    struct StubValidator {
        outcome: ValidationOutcome,
        calls: AtomicU32,
    }

    impl StubValidator {
        fn new(outcome: ValidationOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductValidator for StubValidator {
        async fn validate(&self, _product_id: ProductId) -> ValidationOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<ChangeRecord>>,
    }

    impl RecordingSink {
        fn emitted(&self) -> Vec<ChangeRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    impl ChangeSink for RecordingSink {
        fn emit(&self, record: &ChangeRecord) {
            self.records.lock().unwrap().push(record.clone());
        }
    }

    type TestService =
        InventoryService<Arc<StubValidator>, Arc<InMemoryStockLedger>, Arc<RecordingSink>>;

    fn service_with(
        outcome: ValidationOutcome,
    ) -> (TestService, Arc<StubValidator>, Arc<InMemoryStockLedger>, Arc<RecordingSink>) {
        let validator = StubValidator::new(outcome);
        let ledger = Arc::new(InMemoryStockLedger::new());
        let sink = Arc::new(RecordingSink::default());
        let service = InventoryService::new(validator.clone(), ledger.clone(), sink.clone());
        (service, validator, ledger, sink)
    }

    #[tokio::test]
    async fn create_or_update_creates_record_and_emits_upsert() {
        let (service, _, _, sink) = service_with(ValidationOutcome::Exists);
        let id = ProductId::new(1);

        let record = service.create_or_update(id, 10).await.unwrap();
        assert_eq!(record, StockRecord::new(id, 10));

        let emitted = sink.emitted();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].previous_quantity, None);
        assert_eq!(emitted[0].new_quantity, 10);
        assert_eq!(emitted[0].delta, 10);
        assert_eq!(emitted[0].cause, ChangeCause::Upsert);
    }

    #[tokio::test]
    async fn create_or_update_is_idempotent() {
        let (service, _, _, sink) = service_with(ValidationOutcome::Exists);
        let id = ProductId::new(1);

        let first = service.create_or_update(id, 10).await.unwrap();
        let second = service.create_or_update(id, 10).await.unwrap();

        assert_eq!(first, second);
        let emitted = sink.emitted();
        assert_eq!(emitted[1].previous_quantity, Some(10));
        assert_eq!(emitted[1].delta, 0);
    }

    #[tokio::test]
    async fn create_or_update_rejects_negative_quantity_before_any_io() {
        let (service, validator, ledger, sink) = service_with(ValidationOutcome::Exists);
        let id = ProductId::new(1);

        let err = service.create_or_update(id, -1).await.unwrap_err();
        assert!(matches!(err, InventoryError::InvalidArgument(_)));
        assert_eq!(validator.calls(), 0);
        assert!(ledger.read(id).await.is_err());
        assert!(sink.emitted().is_empty());
    }

    #[tokio::test]
    async fn create_or_update_maps_remote_not_found() {
        let id = ProductId::new(99);
        let (service, _, ledger, _) = service_with(ValidationOutcome::NotFound(id));

        let err = service.create_or_update(id, 5).await.unwrap_err();
        assert_eq!(err, InventoryError::RemoteProductNotFound(id));
        assert!(ledger.read(id).await.is_err());
    }

    #[tokio::test]
    async fn create_or_update_maps_unavailable() {
        let (service, _, _, _) = service_with(ValidationOutcome::Unavailable {
            attempts: 3,
            last_cause: "connection refused".to_string(),
        });

        let err = service.create_or_update(ProductId::new(1), 5).await.unwrap_err();
        assert_eq!(
            err,
            InventoryError::UpstreamUnavailable {
                attempts: 3,
                last_cause: "connection refused".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn purchase_decrements_and_emits_change() {
        let (service, _, _, sink) = service_with(ValidationOutcome::Exists);
        let id = ProductId::new(1);
        service.create_or_update(id, 10).await.unwrap();

        let record = service.purchase(id, 3).await.unwrap();
        assert_eq!(record.quantity, 7);

        let emitted = sink.emitted();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[1].previous_quantity, Some(10));
        assert_eq!(emitted[1].new_quantity, 7);
        assert_eq!(emitted[1].delta, -3);
        assert_eq!(emitted[1].cause, ChangeCause::Purchase);
    }

    #[tokio::test]
    async fn purchase_beyond_stock_is_rejected_and_state_unchanged() {
        let (service, _, _, sink) = service_with(ValidationOutcome::Exists);
        let id = ProductId::new(1);
        service.create_or_update(id, 7).await.unwrap();

        let err = service.purchase(id, 100).await.unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                product_id: id,
                requested: 100,
                available: 7,
            }
        );
        assert_eq!(service.find_by_product_id(id).await.unwrap().quantity, 7);
        // Only the upsert emission; rejected purchases emit nothing.
        assert_eq!(sink.emitted().len(), 1);
    }

    #[tokio::test]
    async fn purchase_rejects_zero_and_negative_quantities() {
        let (service, validator, _, _) = service_with(ValidationOutcome::Exists);
        let id = ProductId::new(1);

        for quantity in [0, -4] {
            let err = service.purchase(id, quantity).await.unwrap_err();
            assert!(matches!(err, InventoryError::InvalidArgument(_)));
        }
        assert_eq!(validator.calls(), 0);
    }

    #[tokio::test]
    async fn purchase_of_unknown_product_skips_ledger() {
        let id = ProductId::new(99);
        let (service, validator, ledger, _) = service_with(ValidationOutcome::NotFound(id));
        ledger.upsert(id, 50).await.unwrap();

        let err = service.purchase(id, 1).await.unwrap_err();
        assert_eq!(err, InventoryError::RemoteProductNotFound(id));
        assert_eq!(validator.calls(), 1);
        // No ledger mutation happened.
        assert_eq!(ledger.read(id).await.unwrap().quantity, 50);
    }

    #[tokio::test]
    async fn purchase_without_local_record_is_inventory_not_found() {
        let (service, _, _, _) = service_with(ValidationOutcome::Exists);
        let id = ProductId::new(12);

        let err = service.purchase(id, 1).await.unwrap_err();
        assert_eq!(err, InventoryError::InventoryNotFound(id));
    }

    #[tokio::test]
    async fn find_by_product_id_does_not_touch_the_validator() {
        let (service, validator, ledger, _) = service_with(ValidationOutcome::Unavailable {
            attempts: 3,
            last_cause: "down".to_string(),
        });
        let id = ProductId::new(1);
        ledger.upsert(id, 3).await.unwrap();

        // Reads succeed even while the catalog is unreachable.
        assert_eq!(service.find_by_product_id(id).await.unwrap().quantity, 3);
        assert_eq!(validator.calls(), 0);
    }

    #[tokio::test]
    async fn find_page_validates_arguments() {
        let (service, _, _, _) = service_with(ValidationOutcome::Exists);

        assert!(matches!(
            service.find_page(-1, 10).await.unwrap_err(),
            InventoryError::InvalidArgument(_)
        ));
        assert!(matches!(
            service.find_page(0, -1).await.unwrap_err(),
            InventoryError::InvalidArgument(_)
        ));

        let page = service.find_page(0, 0).await.unwrap();
        assert!(page.records.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_purchases_drain_stock_exactly_once_each() {
        const K: i64 = 32;
        let validator = StubValidator::new(ValidationOutcome::Exists);
        let ledger = Arc::new(InMemoryStockLedger::new());
        let sink = Arc::new(RecordingSink::default());
        let service = Arc::new(InventoryService::new(
            validator,
            ledger.clone(),
            sink.clone(),
        ));

        let id = ProductId::new(1);
        service.create_or_update(id, K).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..K {
            let service = service.clone();
            handles.push(tokio::spawn(async move { service.purchase(id, 1).await }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(ledger.read(id).await.unwrap().quantity, 0);
        let purchases = sink
            .emitted()
            .iter()
            .filter(|r| r.cause == ChangeCause::Purchase)
            .count();
        assert_eq!(purchases as i64, K);
    }
}
