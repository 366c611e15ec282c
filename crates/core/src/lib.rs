//! `storeflow-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers and the caller-visible error taxonomy.

pub mod error;
pub mod id;

pub use error::{InventoryError, InventoryResult};
pub use id::ProductId;
