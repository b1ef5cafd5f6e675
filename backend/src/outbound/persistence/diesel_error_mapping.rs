//! Translation of pool and Diesel failures into ledger errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::StockLedgerError;

/// Pool failures always mean the store is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> StockLedgerError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    StockLedgerError::connection(message)
}

/// Map a Diesel failure, keeping driver detail in debug logs only.
pub(crate) fn map_diesel_error(error: DieselError) -> StockLedgerError {
    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    } else {
        debug!(error = %error, "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        ) => StockLedgerError::connection("database connection lost"),
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            StockLedgerError::query("stock quantity constraint violated")
        }
        DieselError::DeserializationError(_) => {
            StockLedgerError::query("stock row could not be decoded")
        }
        _ => StockLedgerError::query("database error"),
    }
}
