//! Domain layer for LocalChat
//!
//! Chat turns, conversation history and the readiness model of a local
//! inference server. No I/O happens in this crate.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
