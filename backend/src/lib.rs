//! Conversational stock assistant.
//!
//! A chat bot that keeps a per-user product inventory. Messages are matched
//! against literal commands and a rule-based Spanish interpreter; anything
//! else is answered by a generative text backend.
//!
//! Layout follows ports and adapters:
//! - [`domain`] holds the decision logic and the port traits.
//! - [`outbound`] implements the ports (PostgreSQL, HTTP, files).
//! - [`inbound`] drives the domain from the chat platform.
//! - [`settings`] loads configuration.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
