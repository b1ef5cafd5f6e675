//! Inbound adapters driving the domain.
//!
//! The only driver is the chat platform long-poll loop in [`polling`].

pub mod polling;
