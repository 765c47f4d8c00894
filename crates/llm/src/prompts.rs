//! Prompt templates for the conversational route

/// Instructions prepended to every chat request
pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful customer support assistant. \
Answer the user's message briefly and politely. If you do not know the answer, say so.";

/// Prompt for a single-turn chat reply
pub fn chat_prompt(user_text: &str) -> String {
    format!(
        "{}\n\nUser: {}\nAssistant:",
        CHAT_SYSTEM_PROMPT,
        user_text.trim()
    )
}
