//! Command-line and environment configuration
//!
//! Every option can come from a flag or an environment variable; a `.env`
//! file in the working directory is loaded before parsing.

use clap::{Args, Parser, Subcommand};
use postcraft_agent::PostPipeline;
use postcraft_error::{Error, ErrorKind, Result};
use postcraft_llm::provider::{DEFAULT_TIMEOUT_SECS, GROQ_BASE_URL, GROQ_DEFAULT_MODEL};
use postcraft_llm::{OpenAIProvider, ProviderConfig};
use std::sync::Arc;

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Parser)]
#[command(name = "postcraft")]
#[command(author, version, about = "postcraft - LinkedIn posts from a topic, drafted and edited by an LLM")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub provider: ProviderArgs,

    #[command(flatten)]
    pub listen: ListenArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the web app (default)
    Serve,
    /// Generate one post and print it
    Generate {
        /// The topic to write about
        #[arg(trailing_var_arg = true, required = true)]
        topic: Vec<String>,

        /// Print the post and its stats as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Upstream LLM settings
#[derive(Debug, Clone, Args)]
pub struct ProviderArgs {
    /// API key for the chat-completions endpoint
    #[arg(long = "api-key", env = API_KEY_VAR, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Model used by both stages
    #[arg(long, env = "POSTCRAFT_MODEL", default_value = GROQ_DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Sampling temperature for both stages
    #[arg(long, env = "POSTCRAFT_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE, global = true)]
    pub temperature: f32,

    /// OpenAI-compatible base URL
    #[arg(long = "base-url", env = "POSTCRAFT_BASE_URL", default_value = GROQ_BASE_URL, global = true)]
    pub base_url: String,

    /// HTTP timeout for each LLM call
    #[arg(long = "timeout-secs", env = "POSTCRAFT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,
}

/// Where the web app listens
#[derive(Debug, Clone, Args)]
pub struct ListenArgs {
    #[arg(long, env = "POSTCRAFT_HOST", default_value = DEFAULT_HOST, global = true)]
    pub host: String,

    #[arg(short, long, env = "POSTCRAFT_PORT", default_value_t = DEFAULT_PORT, global = true)]
    pub port: u16,
}

impl ListenArgs {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Validated settings for building the pipeline
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ProviderArgs {
    /// Validate the arguments; a missing key is fatal
    pub fn resolve(&self) -> Result<GenerationConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::config_invalid(
                    API_KEY_VAR,
                    format!("{} not found! Please set it in your environment or .env file", API_KEY_VAR),
                )
                .with_operation("config::resolve")
            })?;

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                format!("temperature must be between 0 and 2, got {}", self.temperature),
            )
            .with_operation("config::resolve"));
        }

        if self.model.trim().is_empty() {
            return Err(Error::config_invalid("POSTCRAFT_MODEL", "model must not be empty")
                .with_operation("config::resolve"));
        }

        Ok(GenerationConfig {
            api_key: api_key.to_string(),
            model: self.model.clone(),
            temperature: self.temperature,
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        })
    }
}

impl GenerationConfig {
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::groq(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_model(self.model.clone())
            .with_timeout(self.timeout_secs)
    }

    /// Build the writer/editor pipeline over one shared HTTP client
    pub fn build_pipeline(&self) -> Result<PostPipeline> {
        let provider = OpenAIProvider::new(self.provider_config())?;
        Ok(PostPipeline::from_provider(
            Arc::new(provider),
            &self.model,
            self.temperature,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(api_key: Option<&str>) -> ProviderArgs {
        ProviderArgs {
            api_key: api_key.map(String::from),
            model: GROQ_DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: GROQ_BASE_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[test]
    fn test_missing_or_blank_key_is_fatal() {
        for key in [None, Some(""), Some("   ")] {
            let err = args(key).resolve().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
            assert!(err.message().contains("GROQ_API_KEY not found"));
        }
    }

    #[test]
    fn test_resolve_trims_key() {
        let config = args(Some("  gsk-abc\n")).resolve().unwrap();
        assert_eq!(config.api_key, "gsk-abc");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_temperature_out_of_range() {
        let mut bad = args(Some("gsk-abc"));
        bad.temperature = 3.5;
        let err = bad.resolve().unwrap_err();
        assert!(err.message().contains("temperature"));
    }

    #[test]
    fn test_provider_config_uses_overrides() {
        let mut custom = args(Some("gsk-abc"));
        custom.base_url = "http://127.0.0.1:9/v1".into();
        custom.model = "llama-3.1-8b-instant".into();
        custom.timeout_secs = 5;

        let config = custom.resolve().unwrap().provider_config();
        assert_eq!(config.api_key.as_deref(), Some("gsk-abc"));
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:9/v1"));
        assert_eq!(config.default_model.as_deref(), Some("llama-3.1-8b-instant"));
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_parse_generate_with_global_flags() {
        let cli = Cli::try_parse_from([
            "postcraft",
            "generate",
            "--api-key",
            "gsk-abc",
            "--temperature",
            "0.2",
            "AI",
            "in",
            "healthcare",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Generate { topic, json }) => {
                assert_eq!(topic.join(" "), "AI in healthcare");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.provider.api_key.as_deref(), Some("gsk-abc"));
        assert_eq!(cli.provider.temperature, 0.2);
    }

    #[test]
    fn test_parse_serve_port() {
        let cli = Cli::try_parse_from(["postcraft", "serve", "--port", "8080", "--host", "127.0.0.1"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert_eq!(cli.listen.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_build_pipeline() {
        assert!(args(Some("gsk-abc")).resolve().unwrap().build_pipeline().is_ok());
    }
}
