//! # postcraft CLI
//!
//! Usage:
//!   postcraft                      serve the web app on 0.0.0.0:5000
//!   postcraft serve --port 8080
//!   postcraft generate <topic>...
//!
//! Examples:
//!   GROQ_API_KEY=gsk-... postcraft
//!   postcraft generate "Remote work productivity"
//!   postcraft generate --json Leadership lessons

use clap::Parser;
use postcraft_agent::{PostGenerator, PostStats};
use postcraft_cli::{logging, server, AppState, Cli, Commands, ListenArgs, ProviderArgs};
use postcraft_error::{Error, ErrorKind, Result};
use std::sync::Arc;
use tokio::net::TcpListener;

async fn run_server(provider: &ProviderArgs, listen: &ListenArgs) -> Result<()> {
    // Fail before binding anything if the key is missing.
    let config = provider.resolve()?;
    let pipeline = config.build_pipeline()?;
    let state = AppState::new(Arc::new(pipeline));

    let listener = TcpListener::bind(listen.addr())
        .await
        .map_err(|e| Error::from(e).with_context("addr", listen.addr()))?;

    tracing::info!("postcraft - LinkedIn Post Generator");
    tracing::info!(model = %config.model, base_url = %config.base_url, "using model");
    tracing::info!("open your browser at http://localhost:{}", listen.port);
    tracing::info!("press Ctrl+C to stop the server");

    server::serve(listener, state, shutdown_signal()).await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn run_generate(provider: &ProviderArgs, topic: &str, json: bool) -> Result<()> {
    let config = provider.resolve()?;
    let pipeline = config.build_pipeline()?;

    tracing::info!(%topic, "generating post");
    let post = pipeline.generate(topic).await?;
    let stats = PostStats::of(&post);

    if json {
        println!("{}", render_json(&post, stats)?);
    } else {
        println!("\n--- YOUR LINKEDIN POST ---\n");
        println!("{}", post);
        println!("\n--- {} ---", stats);
    }

    Ok(())
}

fn render_json(post: &str, stats: PostStats) -> Result<String> {
    let value = serde_json::json!({ "post": post, "stats": stats });
    serde_json::to_string_pretty(&value).map_err(|e| {
        Error::new(ErrorKind::SerializationFailed, e.to_string())
            .with_operation("cli::generate")
            .set_source(e)
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() {
    // Load .env before parsing so its values act as environment defaults.
    let dotenv = dotenvy::dotenv();
    logging::init();

    if let Err(e) = &dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "could not load .env file");
        }
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate { topic, json }) => {
            run_generate(&cli.provider, &topic.join(" "), json).await
        }
        Some(Commands::Serve) | None => run_server(&cli.provider, &cli.listen).await,
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_json_carries_post_and_stats() {
        let post = "Hybrid teams need rituals.\n\n#remote #work";
        let rendered = render_json(post, PostStats::of(post)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["post"], post);
        assert_eq!(value["stats"]["words"], 6);
        assert_eq!(value["stats"]["hashtags"], 2);
        assert_eq!(value["stats"]["lines"], 2);
    }
}
