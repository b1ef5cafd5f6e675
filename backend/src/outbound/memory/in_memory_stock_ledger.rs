//! `StockLedger` held in process memory.
//!
//! A single mutex guards every row, which makes each upsert atomic. Rows
//! remember their creation sequence so listings come back oldest first,
//! matching the PostgreSQL adapter.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{StockLedger, StockLedgerError};
use crate::domain::{StockLine, UpsertOutcome, UserId};

#[derive(Debug)]
struct Row {
    sequence: u64,
    quantity: u64,
}

#[derive(Debug, Default)]
struct Rows {
    next_sequence: u64,
    by_key: HashMap<(UserId, String), Row>,
}

/// Volatile ledger with the same semantics as the PostgreSQL adapter, used by
/// the test suites.
#[derive(Debug, Default)]
pub struct InMemoryStockLedger {
    rows: Mutex<Rows>,
}

impl InMemoryStockLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StockLedgerError {
    StockLedgerError::query("in-memory ledger lock poisoned")
}

#[async_trait]
impl StockLedger for InMemoryStockLedger {
    async fn upsert(
        &self,
        user_id: UserId,
        product: &str,
        delta: u32,
    ) -> Result<UpsertOutcome, StockLedgerError> {
        let mut rows = self.rows.lock().map_err(poisoned)?;
        let key = (user_id, product.to_owned());

        if let Some(row) = rows.by_key.get_mut(&key) {
            row.quantity = row
                .quantity
                .checked_add(u64::from(delta))
                .ok_or_else(|| StockLedgerError::query("stock quantity overflow"))?;
            return Ok(UpsertOutcome::incremented(row.quantity));
        }

        let sequence = rows.next_sequence;
        rows.next_sequence += 1;
        let quantity = u64::from(delta);
        rows.by_key.insert(key, Row { sequence, quantity });
        Ok(UpsertOutcome::inserted(quantity))
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<StockLine>, StockLedgerError> {
        let rows = self.rows.lock().map_err(poisoned)?;
        let mut owned: Vec<(u64, StockLine)> = rows
            .by_key
            .iter()
            .filter(|((owner, _), _)| *owner == user_id)
            .map(|((_, product), row)| (row.sequence, StockLine::new(product.clone(), row.quantity)))
            .collect();
        owned.sort_by_key(|(sequence, _)| *sequence);
        Ok(owned.into_iter().map(|(_, line)| line).collect())
    }
}
