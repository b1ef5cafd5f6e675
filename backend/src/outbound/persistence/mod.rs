//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! The ledger is backed by PostgreSQL via `diesel-async` with a `bb8` pool.
//! Schema definitions (`schema.rs`) and row structs stay private to this
//! module; only domain types cross the boundary, and every database failure
//! is mapped to a [`StockLedgerError`](crate::domain::ports::StockLedgerError).
//!
//! # Example
//!
//! ```ignore
//! use stock_assistant::outbound::persistence::{DbPool, DieselStockLedger, PoolConfig};
//!
//! let pool = DbPool::connect(PoolConfig::new("postgres://localhost/stock")).await?;
//! let ledger = DieselStockLedger::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_stock_ledger;
mod migrations;
mod pool;
mod schema;

pub use diesel_stock_ledger::DieselStockLedger;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
