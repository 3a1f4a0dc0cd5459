//! AI Core - Client for a locally running Ollama server
//!
//! Provides the status probe (`GET /api/tags`) and the non-streaming
//! response generator (`POST /api/generate`), plus the flat transcript
//! format the generator is fed with.

pub mod config;
pub mod error;
pub mod ollama;
pub mod ports;
pub mod transcript;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use ollama::OllamaClient;
pub use ports::{GenerateRequest, InferenceServer};
pub use transcript::build_transcript;
