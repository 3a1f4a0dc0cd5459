//! Conversation entity - the ordered history of one chat session

use serde::{Deserialize, Serialize};

use super::ChatTurn;

/// Ordered conversation history, oldest turn first
///
/// Turns are only ever appended. [`Conversation::clear`] is the single
/// removal operation and empties the whole sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
}

impl Conversation {
    /// Create a new empty conversation
    pub const fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Append a turn
    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// Append a user turn
    pub fn add_user_turn(&mut self, content: impl Into<String>) {
        self.push(ChatTurn::user(content));
    }

    /// Append an assistant turn
    pub fn add_assistant_turn(&mut self, content: impl Into<String>) {
        self.push(ChatTurn::assistant(content));
    }

    /// All turns in order
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Get the last turn in the conversation
    pub fn last_turn(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check if the conversation is empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Remove every turn
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
