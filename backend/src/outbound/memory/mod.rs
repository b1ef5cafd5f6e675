//! Process-local adapters for running without external services.

mod in_memory_stock_ledger;

pub use in_memory_stock_ledger::InMemoryStockLedger;
