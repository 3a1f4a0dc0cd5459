//! Application layer - Use cases and orchestration
//!
//! Defines the ports the supervisor needs from the outside world and the
//! services that drive a chat session against a local inference server.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
