//! AI chat pass-through: ticker detection, quote context, hosted completion.

mod assistant_model;
mod assistant_service;
mod assistant_traits;
mod completion_client;

pub use assistant_model::{ChatMessage, ChatRequest, ChatResponse, ChatSource};
pub use assistant_service::{detect_tickers, AssistantService};
pub use assistant_traits::CompletionClientTrait;
pub use completion_client::{CompletionConfig, OpenAiCompatibleClient};
