//! Flat transcript format for the generate endpoint
//!
//! Every turn becomes one `"<Role>: <content>\n"` line and the transcript
//! ends with an `"Assistant: "` cue for the model to continue from.

use domain::ChatTurn;

/// Cue appended after the last turn
pub const ASSISTANT_CUE: &str = "Assistant: ";

/// Serialize a conversation history into a role-prefixed transcript
pub fn build_transcript(turns: &[ChatTurn]) -> String {
    let mut prompt = String::new();
    for turn in turns {
        prompt.push_str(turn.role.transcript_label());
        prompt.push_str(": ");
        prompt.push_str(&turn.content);
        prompt.push('\n');
    }
    prompt.push_str(ASSISTANT_CUE);
    prompt
}
