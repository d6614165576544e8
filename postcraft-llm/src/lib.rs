//! # postcraft LLM
//!
//! Thin client layer for hosted chat-completion APIs.
//!
//! ## Core Concepts
//! - **Provider**: Trait-based LLM communication (`LlmProvider`)
//! - **OpenAI-compatible**: One implementation covers Groq, OpenAI and local servers
//! - **Errors**: Provider failures map onto the workspace-wide `postcraft_error::Error`

pub mod error;
pub mod provider;

pub use error::{Error, ErrorKind, ErrorStatus, Result};
pub use provider::{
    ChatMessage, CompletionRequest, CompletionResponse, FinishReason, LlmProvider,
    OpenAIProvider, ProviderConfig, ProviderError, ProviderType, Role, Usage,
};
