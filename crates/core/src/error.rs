//! Caller-visible error taxonomy.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the inventory domain.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors surfaced by inventory operations.
///
/// Every variant is terminal for the call that produced it: the orchestrator
/// performs no retries of its own (transient remote failures are absorbed by
/// the retrying validator before they ever reach this type), and a rejected
/// operation leaves state unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Malformed or out-of-range input, caught before any I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The product catalog authoritatively says the product does not exist.
    #[error("product {0} does not exist in the products service")]
    RemoteProductNotFound(ProductId),

    /// The product catalog could not be reached after the full retry budget.
    ///
    /// Distinct from [`InventoryError::RemoteProductNotFound`] so callers can
    /// choose to retry the whole operation later.
    #[error("products service unavailable after {attempts} attempts: {last_cause}")]
    UpstreamUnavailable { attempts: u32, last_cause: String },

    /// The product is valid upstream but has no local stock record.
    #[error("inventory for product {0} not found")]
    InventoryNotFound(ProductId),

    /// Requested purchase quantity exceeds current stock. No partial fulfillment.
    #[error("not enough stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The durable store itself failed; fatal to the operation.
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl InventoryError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }
}
