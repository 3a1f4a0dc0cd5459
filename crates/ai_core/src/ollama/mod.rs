//! Ollama server client
//!
//! Talks to a standard Ollama server over its native `/api` endpoints.

mod client;

pub use client::OllamaClient;
