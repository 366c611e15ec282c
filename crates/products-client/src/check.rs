//! Single-attempt existence check port.

use async_trait::async_trait;

use storeflow_core::ProductId;

/// Outcome of one existence-check attempt against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductCheck {
    /// The catalog answered with a success status.
    Exists,
    /// The catalog answered 404. Terminal: an absent product will not
    /// become present mid-retry-loop.
    NotFound,
    /// Anything else: connect failure, timeout, unexpected status. Worth
    /// retrying; carries the underlying cause for diagnostics.
    Transient(String),
}

/// Asks the catalog "does this product exist", exactly one network attempt
/// per call. Retrying is the caller's concern.
#[async_trait]
pub trait ProductExistenceChecker: Send + Sync {
    async fn check(&self, product_id: ProductId) -> ProductCheck;
}

#[async_trait]
impl<C> ProductExistenceChecker for std::sync::Arc<C>
where
    C: ProductExistenceChecker + ?Sized,
{
    async fn check(&self, product_id: ProductId) -> ProductCheck {
        (**self).check(product_id).await
    }
}
