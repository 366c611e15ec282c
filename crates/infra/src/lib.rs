//! Infrastructure layer: durable storage adapters.

pub mod postgres;

pub use postgres::PostgresStockLedger;
