//! Ledger decorator that bounds every call with a timeout.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use super::ports::{StockLedger, StockLedgerError};
use super::{StockLine, UpsertOutcome, UserId};

/// Wraps a [`StockLedger`] and fails calls that exceed `limit` with
/// [`StockLedgerError::Timeout`].
pub struct TimedStockLedger {
    inner: Arc<dyn StockLedger>,
    limit: Duration,
}

impl TimedStockLedger {
    /// Bound every call on `inner` by `limit`.
    pub fn new(inner: Arc<dyn StockLedger>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl StockLedger for TimedStockLedger {
    async fn upsert(
        &self,
        user_id: UserId,
        product: &str,
        delta: u32,
    ) -> Result<UpsertOutcome, StockLedgerError> {
        timeout(self.limit, self.inner.upsert(user_id, product, delta))
            .await
            .map_err(|_| StockLedgerError::timeout("upsert"))?
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<StockLine>, StockLedgerError> {
        timeout(self.limit, self.inner.list(user_id))
            .await
            .map_err(|_| StockLedgerError::timeout("list"))?
    }
}
