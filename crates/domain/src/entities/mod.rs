//! Domain entities - Objects with identity and lifecycle

mod chat_turn;
mod conversation;
mod server_status;

pub use chat_turn::{ChatTurn, MessageRole};
pub use conversation::Conversation;
pub use server_status::{Readiness, ServerStatus};
