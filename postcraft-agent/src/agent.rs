//! Agents and tasks - one persona-driven LLM call per stage

use async_trait::async_trait;
use postcraft_error::{Error, Result};
use postcraft_llm::{ChatMessage, CompletionRequest, LlmProvider};
use std::sync::Arc;

/// A persona that performs one stage of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl Agent {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    /// Render the persona as a system message
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\n\nYour personal goal is: {}",
            self.role, self.backstory, self.goal
        )
    }
}

/// A unit of work handed to an agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub expected_output: String,
}

impl Task {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Full instruction text for the stage
    pub fn instructions(&self) -> String {
        format!(
            "{}\n\nThis is the expected criteria for your final answer: {}\n\
             Return the complete content itself as your final answer, not a summary of it.",
            self.description, self.expected_output
        )
    }
}

/// One stage of the pipeline: instructions in, text out.
///
/// `prior_output` carries the previous stage's full output, if any.
#[async_trait]
pub trait StageRunner: Send + Sync {
    async fn run(&self, instructions: &str, prior_output: Option<&str>) -> Result<String>;
}

/// Runs a stage by asking an LLM provider to play an agent
pub struct AgentRunner {
    agent: Agent,
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
    temperature: Option<f32>,
}

impl AgentRunner {
    pub fn new(agent: Agent, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            agent,
            provider,
            model: None,
            temperature: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn user_message(instructions: &str, prior_output: Option<&str>) -> String {
        match prior_output {
            Some(prior) => format!(
                "{}\n\nThis is the context you're working with:\n{}",
                instructions, prior
            ),
            None => instructions.to_string(),
        }
    }

    fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(self.provider.default_model())
    }
}

#[async_trait]
impl StageRunner for AgentRunner {
    async fn run(&self, instructions: &str, prior_output: Option<&str>) -> Result<String> {
        let model = self.model().to_string();

        let mut request = CompletionRequest::new(vec![
            ChatMessage::system(self.agent.system_prompt()),
            ChatMessage::user(Self::user_message(instructions, prior_output)),
        ])
        .with_model(&model);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }

        tracing::debug!(role = %self.agent.role, %model, "agent started");

        let response = self.provider.complete(request).await.map_err(|e| {
            Error::from(e)
                .with_operation("agent::run")
                .with_context("role", self.agent.role.clone())
        })?;

        let content = response
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                Error::empty_response(&model)
                    .with_operation("agent::run")
                    .with_context("role", self.agent.role.clone())
            })?;

        tracing::debug!(
            role = %self.agent.role,
            total_tokens = response.usage.total_tokens,
            "agent finished"
        );

        Ok(content)
    }
}
