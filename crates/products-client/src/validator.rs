//! Bounded-retry validation wrapper.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use storeflow_core::ProductId;
use storeflow_inventory::{ProductValidator, ValidationOutcome};

use crate::check::{ProductCheck, ProductExistenceChecker};
use crate::retry::RetryPolicy;

/// Sticky shutdown signal shared between a validator and its host.
///
/// Once triggered it stays triggered: every in-flight backoff sleep is
/// interrupted and every later wait completes immediately, so no validation
/// can stay parked after the host decided to stop.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    inner: Arc<ShutdownInner>,
}

#[derive(Debug, Default)]
struct ShutdownInner {
    triggered: AtomicBool,
    notify: Notify,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger shutdown. Idempotent.
    pub fn shutdown(&self) {
        self.inner.triggered.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_shutdown(&self) -> bool {
        self.inner.triggered.load(Ordering::SeqCst)
    }

    /// Resolve when shutdown has been triggered (immediately if it already
    /// was).
    async fn triggered(&self) {
        // Register interest before re-checking the flag, otherwise a
        // notify_waiters between check and park would be lost.
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutdown() {
            return;
        }
        notified.await;
    }
}

/// Wraps a [`ProductExistenceChecker`] with a fixed-attempt retry loop.
///
/// `Exists` and `NotFound` are terminal and returned immediately. Transient
/// failures are retried with linear backoff until the attempt budget is
/// spent, at which point the last cause is surfaced as `Unavailable`. This
/// is the only component in the service that retries anything.
pub struct RetryingValidator<C> {
    checker: C,
    policy: RetryPolicy,
    shutdown: ShutdownHandle,
}

impl<C> RetryingValidator<C> {
    pub fn new(checker: C) -> Self {
        Self::with_policy(checker, RetryPolicy::default())
    }

    pub fn with_policy(checker: C, policy: RetryPolicy) -> Self {
        Self {
            checker,
            policy,
            shutdown: ShutdownHandle::new(),
        }
    }

    /// Handle that aborts backoff sleeps, in progress and future ones.
    ///
    /// A caller shutting down must never stay blocked in a retry loop;
    /// triggering this handle makes every in-flight validation return
    /// `Unavailable` with an interruption cause instead of sleeping out
    /// its backoff.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }
}

#[async_trait]
impl<C> ProductValidator for RetryingValidator<C>
where
    C: ProductExistenceChecker,
{
    async fn validate(&self, product_id: ProductId) -> ValidationOutcome {
        let max_attempts = self.policy.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;

            let cause = match self.checker.check(product_id).await {
                ProductCheck::Exists => return ValidationOutcome::Exists,
                ProductCheck::NotFound => return ValidationOutcome::NotFound(product_id),
                ProductCheck::Transient(cause) => cause,
            };

            if attempt >= max_attempts {
                tracing::warn!(
                    product_id = %product_id,
                    attempts = attempt,
                    last_cause = %cause,
                    "products service unreachable, retry budget spent"
                );
                return ValidationOutcome::Unavailable {
                    attempts: attempt,
                    last_cause: cause,
                };
            }

            let delay = self.policy.delay_for_attempt(attempt);
            tracing::debug!(
                product_id = %product_id,
                attempt,
                delay_ms = delay.as_millis() as u64,
                cause = %cause,
                "transient products service failure, backing off"
            );

            tokio::select! {
                _ = self.shutdown.triggered() => {
                    return ValidationOutcome::Unavailable {
                        attempts: attempt,
                        last_cause: "retry interrupted by shutdown".to_string(),
                    };
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
