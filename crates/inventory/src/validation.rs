//! Remote product validation port.

use async_trait::async_trait;

use storeflow_core::ProductId;

/// Terminal outcome of validating a product against the remote catalog.
///
/// Produced fresh per call, never persisted. Transient remote failures are
/// absorbed by the validator implementation; callers only ever see one of
/// these three outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The catalog confirmed the product exists.
    Exists,
    /// The catalog authoritatively reported the product absent.
    NotFound(ProductId),
    /// The catalog could not be reached within the retry budget.
    Unavailable { attempts: u32, last_cause: String },
}

/// Confirms a product is real before a stock mutation is allowed.
#[async_trait]
pub trait ProductValidator: Send + Sync {
    async fn validate(&self, product_id: ProductId) -> ValidationOutcome;
}

#[async_trait]
impl<V> ProductValidator for std::sync::Arc<V>
where
    V: ProductValidator + ?Sized,
{
    async fn validate(&self, product_id: ProductId) -> ValidationOutcome {
        (**self).validate(product_id).await
    }
}
