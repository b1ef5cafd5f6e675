//! Outbound adapters implementing the domain ports.
//!
//! - `persistence`: PostgreSQL stock ledger over Diesel.
//! - `memory`: in-process ledger for database-less runs and tests.
//! - `generative`: HTTP text generation backend.
//! - `telegram`: Bot API chat transport.
//! - `files`: report directory and static image.

pub mod files;
pub mod generative;
mod http_support;
pub mod memory;
pub mod persistence;
pub mod telegram;
