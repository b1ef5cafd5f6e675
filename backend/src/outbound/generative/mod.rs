//! Generative text backend adapters.
//!
//! A thin HTTP implementation of the `TextGenerator` port. Two request
//! shapes are supported: the legacy single-prompt `generate` call and an
//! OpenAI-style chat completion.

mod dto;
mod http_generator;

pub use http_generator::{GenerativeFlavor, HttpTextGenerator, UnknownFlavor};
