//! PostgreSQL-backed `StockLedger` implementation using Diesel ORM.
//!
//! Upserts are a single `INSERT ... ON CONFLICT DO UPDATE` statement, so the
//! database serialises concurrent writes to the same `(user_id, product)`
//! row and no increment is lost.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Text};
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::stock;
use crate::domain::ports::{StockLedger, StockLedgerError};
use crate::domain::{StockLine, UpsertOutcome, UserId};

// `xmax = 0` only holds for a freshly inserted tuple.
const UPSERT_SQL: &str = r"
INSERT INTO stock (user_id, product, quantity)
VALUES ($1, $2, $3)
ON CONFLICT (user_id, product) DO UPDATE
SET quantity = stock.quantity + EXCLUDED.quantity,
    updated_at = now()
RETURNING quantity, (xmax = 0) AS inserted
";

#[derive(QueryableByName)]
struct UpsertedRow {
    #[diesel(sql_type = BigInt)]
    quantity: i64,
    #[diesel(sql_type = Bool)]
    inserted: bool,
}

/// Diesel-backed implementation of the [`StockLedger`] port.
#[derive(Clone)]
pub struct DieselStockLedger {
    pool: DbPool,
}

impl DieselStockLedger {
    /// Create a new ledger with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn stored_quantity(raw: i64) -> Result<u64, StockLedgerError> {
    u64::try_from(raw).map_err(|_| StockLedgerError::query("negative quantity stored"))
}

#[async_trait]
impl StockLedger for DieselStockLedger {
    async fn upsert(
        &self,
        user_id: UserId,
        product: &str,
        delta: u32,
    ) -> Result<UpsertOutcome, StockLedgerError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let row: UpsertedRow = diesel::sql_query(UPSERT_SQL)
            .bind::<BigInt, _>(user_id.get())
            .bind::<Text, _>(product)
            .bind::<BigInt, _>(i64::from(delta))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let quantity = stored_quantity(row.quantity)?;
        debug!(user_id = user_id.get(), inserted = row.inserted, quantity, "stock upserted");
        Ok(if row.inserted {
            UpsertOutcome::inserted(quantity)
        } else {
            UpsertOutcome::incremented(quantity)
        })
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<StockLine>, StockLedgerError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;

        let rows: Vec<(String, i64)> = stock::table
            .filter(stock::user_id.eq(user_id.get()))
            .order((stock::created_at.asc(), stock::product.asc()))
            .select((stock::product, stock::quantity))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(product, quantity)| Ok(StockLine::new(product, stored_quantity(quantity)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Ok(0))]
    #[case(42, Ok(42))]
    #[case(-1, Err(StockLedgerError::query("negative quantity stored")))]
    fn stored_quantities_must_be_non_negative(
        #[case] raw: i64,
        #[case] expected: Result<u64, StockLedgerError>,
    ) {
        assert_eq!(stored_quantity(raw), expected);
    }

    #[rstest]
    fn upsert_statement_is_atomic_on_the_composite_key() {
        assert!(UPSERT_SQL.contains("ON CONFLICT (user_id, product) DO UPDATE"));
        assert!(UPSERT_SQL.contains("stock.quantity + EXCLUDED.quantity"));
    }
}
