//! HTTP facade: the static page and the generate endpoint.
//!
//! Every `/generate` outcome is an HTTP 200 with a JSON body whose `success`
//! flag tells the page what happened.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use postcraft_agent::{PostGenerator, TOPIC_REQUIRED};
use postcraft_error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Everything a request handler needs, built once at startup
#[derive(Clone)]
pub struct AppState {
    generator: Arc<dyn PostGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn PostGenerator>) -> Self {
        Self { generator }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn ok(post: impl Into<String>) -> Self {
        Self {
            success: true,
            post: Some(post.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            post: None,
            error: Some(error.into()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::from(e).with_operation("server::serve"))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Only a JSON object is a request. serde would otherwise read `["x"]` as a
/// one-field struct.
fn parse_request(body: &[u8]) -> std::result::Result<GenerateRequest, String> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("request body must be a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

async fn generate(State(state): State<AppState>, body: Bytes) -> Json<GenerateResponse> {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "malformed generate request");
            return Json(GenerateResponse::failed(e));
        }
    };

    let topic = match request.topic {
        Some(topic) if !topic.is_empty() => topic,
        _ => return Json(GenerateResponse::failed(TOPIC_REQUIRED)),
    };

    tracing::info!(%topic, "generating post");

    match state.generator.generate(&topic).await {
        Ok(post) => {
            tracing::info!(chars = post.len(), "post generated successfully");
            Json(GenerateResponse::ok(post))
        }
        Err(e) => {
            tracing::error!(error = %e, "post generation failed");
            Json(GenerateResponse::failed(e.brief()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use postcraft_agent::{PostPipeline, StageRunner};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed post, except for the topic "boom" which fails
    #[derive(Default)]
    struct StubGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PostGenerator for StubGenerator {
        async fn generate(&self, topic: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if topic == "boom" {
                return Err(Error::inference_failed("upstream exploded"));
            }
            Ok(format!("  post about {topic}\n#tag  "))
        }
    }

    struct FixedStage(&'static str);

    #[async_trait]
    impl StageRunner for FixedStage {
        async fn run(&self, _instructions: &str, _prior_output: Option<&str>) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    async fn spawn(generator: Arc<dyn PostGenerator>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = AppState::new(generator);
        tokio::spawn(async move {
            serve(listener, state, std::future::pending()).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn post_raw(base: &str, body: &str) -> Value {
        let response = reqwest::Client::new()
            .post(format!("{}/generate", base))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let base = spawn(Arc::new(StubGenerator::default())).await;
        let response = reqwest::get(format!("{}/", base)).await.unwrap();

        assert_eq!(response.status(), 200);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let html = response.text().await.unwrap();
        assert!(html.contains("LinkedIn Post Generator"));
        assert!(html.contains("/generate"));
    }

    #[tokio::test]
    async fn test_empty_or_missing_topic_skips_generator() {
        let generator = Arc::new(StubGenerator::default());
        let base = spawn(generator.clone()).await;

        for body in [r#"{"topic": ""}"#, r#"{}"#, r#"{"topic": null}"#] {
            let value = post_raw(&base, body).await;
            assert_eq!(value, json!({ "success": false, "error": "Topic is required" }));
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_failure_response() {
        let generator = Arc::new(StubGenerator::default());
        let base = spawn(generator.clone()).await;

        for body in ["not json", "", "[1, 2]", r#"{"topic": 5}"#] {
            let value = post_raw(&base, body).await;
            assert_eq!(value["success"], false);
            assert!(!value["error"].as_str().unwrap().is_empty());
            assert!(value.get("post").is_none());
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_array_body_is_not_a_topic() {
        let generator = Arc::new(StubGenerator::default());
        let base = spawn(generator.clone()).await;

        for body in [r#"["Remote work productivity"]"#, r#"["x"]"#, "\"x\"", "42"] {
            let value = post_raw(&base, body).await;
            assert_eq!(
                value,
                json!({ "success": false, "error": "request body must be a JSON object" })
            );
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_parse_request_accepts_objects_only() {
        let request = parse_request(br#"{"topic": "AI in healthcare"}"#).unwrap();
        assert_eq!(request.topic.as_deref(), Some("AI in healthcare"));

        assert!(parse_request(br#"["AI in healthcare"]"#).is_err());
        assert!(parse_request(br#"{"topic": ["AI"]}"#).is_err());
    }

    #[tokio::test]
    async fn test_post_is_returned_unmodified() {
        let generator = Arc::new(StubGenerator::default());
        let base = spawn(generator.clone()).await;

        let value = post_raw(&base, r#"{"topic": "Career growth tips"}"#).await;
        assert_eq!(
            value,
            json!({ "success": true, "post": "  post about Career growth tips\n#tag  " })
        );
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generator_error_keeps_server_alive() {
        let generator = Arc::new(StubGenerator::default());
        let base = spawn(generator.clone()).await;

        let value = post_raw(&base, r#"{"topic": "boom"}"#).await;
        assert_eq!(value, json!({ "success": false, "error": "upstream exploded" }));

        let value = post_raw(&base, r#"{"topic": "Digital transformation"}"#).await;
        assert_eq!(value["success"], true);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_remote_work_scenario() {
        let pipeline = PostPipeline::new(
            Arc::new(FixedStage("DRAFT")),
            Arc::new(FixedStage("FINAL POST #remote #work")),
        );
        let base = spawn(Arc::new(pipeline)).await;

        let value = post_raw(&base, r#"{"topic": "Remote work productivity"}"#).await;
        assert_eq!(value, json!({ "success": true, "post": "FINAL POST #remote #work" }));
    }

    #[test]
    fn test_response_serialization_omits_unused_field() {
        let ok = serde_json::to_value(GenerateResponse::ok("T")).unwrap();
        assert_eq!(ok, json!({ "success": true, "post": "T" }));

        let failed = serde_json::to_value(GenerateResponse::failed("nope")).unwrap();
        assert_eq!(failed, json!({ "success": false, "error": "nope" }));
    }
}
