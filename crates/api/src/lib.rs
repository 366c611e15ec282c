//! HTTP surface of the inventory service.
//!
//! Thin layer only: JSON:API envelope formatting, outcome-to-status
//! mapping, and dependency wiring. All business rules live in
//! `storeflow-inventory`.

pub mod app;
pub mod config;
