//! Client for the products service (the remote catalog).
//!
//! One concern per module: `check` defines the single-attempt existence
//! check port, `http` is its reqwest implementation, `retry` the backoff
//! policy, `validator` the bounded-retry wrapper that turns repeated
//! transient failures into a terminal `Unavailable` outcome.

pub mod check;
pub mod config;
pub mod http;
pub mod retry;
pub mod validator;

pub use check::{ProductCheck, ProductExistenceChecker};
pub use config::ProductsClientConfig;
pub use http::HttpProductsClient;
pub use retry::RetryPolicy;
pub use validator::{RetryingValidator, ShutdownHandle};
