//! # postcraft Agent
//!
//! Turns a topic into a LinkedIn post with two sequential LLM calls:
//! 1. The writer drafts the post from the topic
//! 2. The editor rewrites the draft (hashtags, formatting, call-to-action)
//!
//! The editor's output is the final post. Either stage failing fails the
//! whole generation; nothing is retried and no partial output is returned.

mod agent;
mod pipeline;
pub mod prompts;
mod stats;

pub use agent::{Agent, AgentRunner, StageRunner, Task};
pub use pipeline::{PostGenerator, PostPipeline, TOPIC_REQUIRED};
pub use stats::PostStats;
