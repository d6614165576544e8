//! Draft -> Edit pipeline

use crate::agent::{AgentRunner, StageRunner};
use crate::prompts;
use async_trait::async_trait;
use postcraft_error::{Error, Result};
use postcraft_llm::LlmProvider;
use std::sync::Arc;

/// Message used whenever a topic is missing or empty
pub const TOPIC_REQUIRED: &str = "Topic is required";

/// Anything that can turn a topic into a finished post
#[async_trait]
pub trait PostGenerator: Send + Sync {
    async fn generate(&self, topic: &str) -> Result<String>;
}

/// Two stages run back to back; the editor sees the writer's full output
pub struct PostPipeline {
    writer: Arc<dyn StageRunner>,
    editor: Arc<dyn StageRunner>,
}

impl PostPipeline {
    pub fn new(writer: Arc<dyn StageRunner>, editor: Arc<dyn StageRunner>) -> Self {
        Self { writer, editor }
    }

    /// Both stages backed by the same provider, model and temperature
    pub fn from_provider(provider: Arc<dyn LlmProvider>, model: &str, temperature: f32) -> Self {
        let writer = AgentRunner::new(prompts::writer(), provider.clone())
            .with_model(model)
            .with_temperature(temperature);
        let editor = AgentRunner::new(prompts::editor(), provider)
            .with_model(model)
            .with_temperature(temperature);

        Self::new(Arc::new(writer), Arc::new(editor))
    }
}

#[async_trait]
impl PostGenerator for PostPipeline {
    async fn generate(&self, topic: &str) -> Result<String> {
        if topic.is_empty() {
            return Err(Error::invalid_argument(TOPIC_REQUIRED).with_operation("pipeline::generate"));
        }

        tracing::info!("writer is drafting the post");
        let draft = self
            .writer
            .run(&prompts::draft_task(topic).instructions(), None)
            .await
            .map_err(|e| e.with_operation("pipeline::draft"))?;

        tracing::info!(draft_chars = draft.len(), "editor is polishing the draft");
        let post = self
            .editor
            .run(&prompts::edit_task().instructions(), Some(&draft))
            .await
            .map_err(|e| e.with_operation("pipeline::edit"))?;

        Ok(post)
    }
}
