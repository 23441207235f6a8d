//! Abstractions for generating abstractive summaries via local model runtimes.
//!
//! The pipeline only depends on the [`Summarizer`] contract. The Ollama-backed client issues
//! HTTP requests directly to the runtime and doubles as the [`ModelCatalog`] used by the
//! pre-run availability check.

use crate::config::Config;
use crate::models::{ModelCatalog, ModelCatalogError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced while attempting abstractive summarization.
#[derive(Debug, Error)]
pub enum SummarizationError {
    /// Extracted text contained nothing to summarize.
    #[error("Document contains no text to summarize")]
    EmptyInput,
    /// Provider was unreachable or timed out.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Interface implemented by abstractive summarization providers.
///
/// Implementations must not retry internally; every failure is reported once so the caller
/// can treat it as a per-file error.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text` with the named model.
    async fn summarize(&self, model: &str, text: &str) -> Result<String, SummarizationError>;
}

/// Build the summarization prompt for a document.
pub(crate) fn build_prompt(text: &str) -> String {
    format!(
        "System: You summarize documents into concise, factual prose. Prefer neutral tone. \
         Avoid speculation. Cover the main points in a few short paragraphs and reply with the \
         summary only.\n\nSummarize the following document:\n\n{}",
        text.trim()
    )
}

/// Drop a leading `<think>…</think>` block emitted by reasoning models.
pub(crate) fn strip_reasoning(response: &str) -> &str {
    let trimmed = response.trim_start();
    if let Some(rest) = trimmed.strip_prefix("<think>") {
        if let Some(end) = rest.find("</think>") {
            return rest[end + "</think>".len()..].trim();
        }
    }
    response.trim()
}

/// Ollama HTTP client implementing both [`Summarizer`] and [`ModelCatalog`].
pub struct OllamaClient {
    http: Client,
    base_url: String,
}

impl OllamaClient {
    /// Build a client for `base_url` with an optional per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent("text-summary/ollama");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into(),
        })
    }

    /// Build a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(config.ollama_url.clone(), config.ollama_timeout)
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

#[async_trait]
impl Summarizer for OllamaClient {
    async fn summarize(&self, model: &str, text: &str) -> Result<String, SummarizationError> {
        if text.trim().is_empty() {
            return Err(SummarizationError::EmptyInput);
        }

        let payload = json!({
            "model": model,
            "prompt": build_prompt(text),
            "stream": false,
            "options": {
                // Lower temperature for deterministic summaries.
                "temperature": 0.1,
            }
        });

        let endpoint = self.endpoint("/api/generate");
        tracing::debug!(model, bytes = text.len(), "Requesting summary");
        let response = self
            .http
            .post(&endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationError::ProviderUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationError::GenerationFailed(format!(
                "Ollama endpoint {endpoint} returned 404: {body}"
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|error| {
            SummarizationError::InvalidResponse(format!("failed to decode Ollama response: {error}"))
        })?;

        if !body.done {
            return Err(SummarizationError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        let summary = strip_reasoning(&body.response);
        if summary.is_empty() {
            return Err(SummarizationError::InvalidResponse(
                "Ollama returned an empty summary".into(),
            ));
        }
        Ok(summary.to_string())
    }
}

#[async_trait]
impl ModelCatalog for OllamaClient {
    async fn list_models(&self) -> Result<Vec<String>, ModelCatalogError> {
        let response = self
            .http
            .get(self.endpoint("/api/tags"))
            .send()
            .await
            .map_err(|error| {
                ModelCatalogError(format!("failed to reach Ollama at {}: {error}", self.base_url))
            })?;

        if !response.status().is_success() {
            return Err(ModelCatalogError(format!(
                "Ollama returned {} while listing models",
                response.status()
            )));
        }

        let body: TagsResponse = response
            .json()
            .await
            .map_err(|error| ModelCatalogError(format!("failed to decode model list: {error}")))?;
        Ok(body.models.into_iter().map(|entry| entry.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CapturedLogs;
    use httpmock::{
        Method::{GET, POST},
        MockServer,
    };

    fn client_for(server: &MockServer) -> OllamaClient {
        OllamaClient::new(server.base_url(), None).expect("client")
    }

    #[tokio::test]
    async fn ollama_client_handles_successful_response() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/generate")
                    .json_body_partial(r#"{"model": "gemma3:4b", "stream": false}"#);
                then.status(200).json_body(json!({
                    "response": "  Summary text\n",
                    "done": true
                }));
            })
            .await;

        let summary = client
            .summarize("gemma3:4b", "A long document body.")
            .await
            .expect("summary");

        mock.assert();
        assert_eq!(summary, "Summary text");
    }

    #[tokio::test]
    async fn summary_request_logs_input_size_in_bytes() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200).json_body(json!({ "response": "ok", "done": true }));
            })
            .await;
        let (logs, _guard) = CapturedLogs::install();

        // "résumé" is 6 characters but 8 bytes.
        client.summarize("gemma3:4b", "résumé").await.expect("summary");

        let captured = logs.contents();
        assert!(captured.contains("Requesting summary"), "{captured}");
        assert!(captured.contains("bytes=8"), "{captured}");
    }

    #[tokio::test]
    async fn ollama_client_handles_error_status() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(500).body("boom");
            })
            .await;

        let error = client
            .summarize("gemma3:4b", "Document")
            .await
            .expect_err("error response");

        assert!(
            matches!(&error, SummarizationError::GenerationFailed(message) if message.contains("500"))
        );
    }

    #[tokio::test]
    async fn ollama_client_rejects_incomplete_response() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200)
                    .json_body(json!({ "response": "partial", "done": false }));
            })
            .await;

        let error = client
            .summarize("gemma3:4b", "Document")
            .await
            .expect_err("incomplete");
        assert!(matches!(error, SummarizationError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn empty_text_is_rejected_without_calling_provider() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200)
                    .json_body(json!({ "response": "unused", "done": true }));
            })
            .await;

        let error = client.summarize("gemma3:4b", "  \n ").await.expect_err("empty");
        assert!(matches!(error, SummarizationError::EmptyInput));
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn unreachable_provider_is_reported() {
        let client = OllamaClient::new("http://127.0.0.1:9", None).expect("client");
        let error = client
            .summarize("gemma3:4b", "Document")
            .await
            .expect_err("unreachable");
        assert!(matches!(error, SummarizationError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn list_models_reads_tag_names() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tags");
                then.status(200).json_body(json!({
                    "models": [
                        { "name": "gemma3:4b", "model": "gemma3:4b", "size": 1 },
                        { "name": "mistral:latest", "model": "mistral:latest", "size": 2 }
                    ]
                }));
            })
            .await;

        let models = client.list_models().await.expect("models");
        assert_eq!(models, vec!["gemma3:4b", "mistral:latest"]);
    }

    #[tokio::test]
    async fn list_models_reports_error_status() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tags");
                then.status(503);
            })
            .await;

        let error = client.list_models().await.expect_err("unavailable");
        assert!(error.to_string().contains("503"));
    }

    #[test]
    fn strip_reasoning_drops_think_block() {
        assert_eq!(
            strip_reasoning("<think>\nplanning\n</think>\n\nFinal summary."),
            "Final summary."
        );
        assert_eq!(strip_reasoning("  Plain summary  "), "Plain summary");
        assert_eq!(strip_reasoning("<think>unterminated"), "<think>unterminated");
    }

    #[test]
    fn prompt_embeds_document_text() {
        let prompt = build_prompt("  Body text.  ");
        assert!(prompt.ends_with("Body text."));
        assert!(prompt.contains("Summarize the following document"));
    }
}
