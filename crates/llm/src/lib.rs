//! AutoRoute LLM Integration
//!
//! Ollama API client used as the embedding producer and the chat model

mod client;
mod llm_trait;
mod prompts;
mod types;

pub use client::OllamaClient;
pub use llm_trait::LlmClient;
pub use prompts::{chat_prompt, CHAT_SYSTEM_PROMPT};
pub use types::{EmbedRequest, EmbedResponse, GenerateRequest, GenerateResponse};
