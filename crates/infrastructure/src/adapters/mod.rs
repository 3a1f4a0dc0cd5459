//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod ollama_generation_adapter;
mod ollama_process_adapter;
mod ollama_status_adapter;

pub use ollama_generation_adapter::OllamaGenerationAdapter;
pub use ollama_process_adapter::OllamaProcessAdapter;
pub use ollama_status_adapter::OllamaStatusAdapter;
