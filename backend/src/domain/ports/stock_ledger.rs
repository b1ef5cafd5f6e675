//! Port abstraction for the per-user stock ledger and its errors.
use async_trait::async_trait;

use crate::domain::{StockLine, UpsertOutcome, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by stock ledger adapters.
    pub enum StockLedgerError {
        /// Ledger connection could not be established or was lost.
        Connection { message: String } => "stock ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "stock ledger query failed: {message}",
        /// The operation did not finish within its time bound.
        Timeout { operation: String } => "stock ledger {operation} timed out",
    }
}

/// Durable `(user, product) -> quantity` store.
///
/// Implementations must make [`StockLedger::upsert`] atomic per
/// `(user, product)` key: concurrent upserts for the same key never lose an
/// increment and never create duplicate rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Add `delta` units of `product` to the user's stock, creating the row
    /// when it does not exist yet.
    async fn upsert(
        &self,
        user_id: UserId,
        product: &str,
        delta: u32,
    ) -> Result<UpsertOutcome, StockLedgerError>;

    /// Every row owned by the user, oldest first.
    async fn list(&self, user_id: UserId) -> Result<Vec<StockLine>, StockLedgerError>;
}
