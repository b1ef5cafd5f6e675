//! Rule-based interpreter for Spanish stock commands.
//!
//! This crate turns free-text chat messages into stock commands. It is
//! deliberately narrow: a fixed synonym table and a single regular
//! expression, with no tolerance for word order or other languages. It has
//! no I/O and no async surface so the service crate can call it inline.
//!
//! # Overview
//!
//! - [`SynonymTable`] maps verb variants (`"añadime"`, `"sumar"`, …) to the
//!   canonical actions `"agregar"` and `"quitar"`.
//! - [`IntentParser`] lowercases a message, finds the first keyword and
//!   captures an optional digit run plus the remaining product text.
//!
//! # Example
//!
//! ```
//! use stock_intent::{ActionKind, IntentParser};
//!
//! let parser = IntentParser::spanish().expect("parser builds");
//! let command = parser
//!     .parse_command("che, añadime 5 pan")
//!     .expect("quantity is valid")
//!     .expect("a keyword matched");
//!
//! assert_eq!(command.action, ActionKind::Add);
//! assert_eq!(command.quantity, 5);
//! assert_eq!(command.product, "pan");
//! ```

mod error;
mod parser;
mod synonyms;

pub use error::IntentError;
pub use parser::{Command, DEFAULT_QUANTITY, Intent, IntentParser, ParseOutcome};
pub use synonyms::{ActionKind, CANONICAL_ADD, CANONICAL_REMOVE, SynonymTable};
