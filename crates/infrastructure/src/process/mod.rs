//! External process management for the local inference server

mod ollama_process;

pub use ollama_process::{OllamaProcess, ProcessError};
