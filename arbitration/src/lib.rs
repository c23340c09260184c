//! LLM arbitration: one prompt per run, one free-text reply, one final call

pub mod arbiter;
pub mod client;
pub mod error;
pub mod prompt;
pub mod reply;

pub use arbiter::{Arbiter, NO_NEWS_REASON};
pub use client::{ChatCompletionClient, ChatModel, ModelConfig};
pub use error::ArbitrationError;
pub use prompt::build_prompt;
pub use reply::parse_reply;
