//! Postgres-backed stock ledger.
//!
//! Per-key exclusion is delegated to the database: both `upsert` and
//! `apply_delta` take a row lock (`FOR UPDATE`) inside a transaction, so
//! the read that classifies the outcome and the write that follows see
//! the same row state. Rows for different products never contend.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use storeflow_core::ProductId;
use storeflow_inventory::{LedgerError, StockLedger, StockPage, StockRecord};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS stock_records (
    product_id BIGINT PRIMARY KEY,
    quantity   BIGINT NOT NULL CHECK (quantity >= 0)
)
"#;

/// Durable stock ledger on PostgreSQL.
pub struct PostgresStockLedger {
    pool: PgPool,
}

impl PostgresStockLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the backing table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), LedgerError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}

#[async_trait]
impl StockLedger for PostgresStockLedger {
    async fn read(&self, product_id: ProductId) -> Result<StockRecord, LedgerError> {
        let row = sqlx::query("SELECT quantity FROM stock_records WHERE product_id = $1")
            .bind(pg_id(product_id)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or(LedgerError::NotFound(product_id))?;

        Ok(StockRecord::new(product_id, row.get::<i64, _>("quantity")))
    }

    async fn upsert(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(StockRecord, Option<i64>), LedgerError> {
        let id = pg_id(product_id)?;
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let previous = sqlx::query(
            "SELECT quantity FROM stock_records WHERE product_id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error)?
        .map(|row| row.get::<i64, _>("quantity"));

        sqlx::query(
            "INSERT INTO stock_records (product_id, quantity) VALUES ($1, $2) \
             ON CONFLICT (product_id) DO UPDATE SET quantity = EXCLUDED.quantity",
        )
        .bind(id)
        .bind(quantity)
        .execute(&mut *tx)
        .await
        .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)?;

        Ok((StockRecord::new(product_id, quantity), previous))
    }

    async fn apply_delta(
        &self,
        product_id: ProductId,
        delta: i64,
    ) -> Result<StockRecord, LedgerError> {
        let id = pg_id(product_id)?;
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        // Lock the row first so the availability we classify against is
        // the same value the UPDATE below operates on.
        let available = sqlx::query(
            "SELECT quantity FROM stock_records WHERE product_id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error)?
        .map(|row| row.get::<i64, _>("quantity"));

        let Some(available) = available else {
            return Err(LedgerError::NotFound(product_id));
        };

        let Some(new_quantity) = available.checked_add(delta) else {
            return Err(LedgerError::storage(format!(
                "quantity overflow applying delta {delta} to product {product_id}"
            )));
        };
        if new_quantity < 0 {
            return Err(LedgerError::InsufficientStock {
                product_id,
                requested: -delta,
                available,
            });
        }

        sqlx::query("UPDATE stock_records SET quantity = $2 WHERE product_id = $1")
            .bind(id)
            .bind(new_quantity)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)?;

        Ok(StockRecord::new(product_id, new_quantity))
    }

    async fn page(&self, page_number: u64, page_size: u64) -> Result<StockPage, LedgerError> {
        let total_elements = sqlx::query("SELECT COUNT(*) AS total FROM stock_records")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?
            .get::<i64, _>("total") as u64;

        let offset = page_number.saturating_mul(page_size);
        let rows = sqlx::query(
            "SELECT product_id, quantity FROM stock_records \
             ORDER BY product_id ASC LIMIT $1 OFFSET $2",
        )
        .bind(page_size.min(i64::MAX as u64) as i64)
        .bind(offset.min(i64::MAX as u64) as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let records = rows
            .into_iter()
            .map(|row| {
                StockRecord::new(
                    ProductId::new(row.get::<i64, _>("product_id") as u64),
                    row.get::<i64, _>("quantity"),
                )
            })
            .collect();

        Ok(StockPage::new(records, page_number, page_size, total_elements))
    }
}

/// Narrow a product id to the BIGINT column type.
///
/// Ids above `i64::MAX` cannot be stored without wrapping negative, which
/// would also corrupt the ascending page order, so they are rejected
/// outright instead of cast.
fn pg_id(product_id: ProductId) -> Result<i64, LedgerError> {
    i64::try_from(product_id.value()).map_err(|_| {
        LedgerError::storage(format!(
            "product id {product_id} exceeds the storable range"
        ))
    })
}

fn storage_error(err: sqlx::Error) -> LedgerError {
    LedgerError::storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_within_bigint_range_pass_through() {
        assert_eq!(pg_id(ProductId::new(0)).unwrap(), 0);
        assert_eq!(pg_id(ProductId::new(42)).unwrap(), 42);
        assert_eq!(
            pg_id(ProductId::new(i64::MAX as u64)).unwrap(),
            i64::MAX
        );
    }

    #[test]
    fn ids_beyond_bigint_range_are_rejected() {
        for value in [i64::MAX as u64 + 1, u64::MAX] {
            let err = pg_id(ProductId::new(value)).unwrap_err();
            match err {
                LedgerError::Storage(cause) => {
                    assert!(cause.contains(&value.to_string()));
                    assert!(cause.contains("storable range"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
