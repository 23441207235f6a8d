//! Processing service shared by the HTTP, CLI, and MCP front ends.

use crate::{
    config::Config,
    metrics::{MetricsSnapshot, RunMetrics},
    models::{ModelCatalog, SupportedModels},
    parsers::ParserRegistry,
    processing::{
        pipeline::BatchPipeline,
        types::{ProcessedSet, ProcessingError, ProcessingRequest, RunReport},
    },
    summarization::{OllamaClient, Summarizer},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Owns the long-lived collaborators of the batch pipeline.
///
/// The parser registry, summarizer, and model catalog are built once near process start and
/// reused for every run; front ends share the service through an `Arc`.
pub struct ProcessingService {
    registry: ParserRegistry,
    summarizer: Arc<dyn Summarizer>,
    catalog: Arc<dyn ModelCatalog>,
    supported_models: SupportedModels,
    metrics: Arc<RunMetrics>,
}

/// Abstraction over the processing pipeline used by external surfaces (HTTP, CLI, MCP).
#[async_trait]
pub trait ProcessingApi: Send + Sync {
    /// Summarize every supported file of a directory.
    async fn process_directory(
        &self,
        request: ProcessingRequest,
    ) -> Result<ProcessedSet, ProcessingError>;

    /// Ordered catalog of selectable models.
    fn supported_models(&self) -> &SupportedModels;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl ProcessingService {
    /// Build the service against the Ollama backend described by `config`.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        tracing::info!(ollama_url = %config.ollama_url, "Initializing Ollama client");
        let client = Arc::new(OllamaClient::from_config(config)?);
        let summarizer: Arc<dyn Summarizer> = client.clone();
        let catalog: Arc<dyn ModelCatalog> = client;
        Ok(Self::from_parts(
            ParserRegistry::with_defaults(),
            summarizer,
            catalog,
            config.supported_models.clone(),
        ))
    }

    /// Assemble the service from explicit collaborators.
    pub fn from_parts(
        registry: ParserRegistry,
        summarizer: Arc<dyn Summarizer>,
        catalog: Arc<dyn ModelCatalog>,
        supported_models: SupportedModels,
    ) -> Self {
        tracing::debug!(parsers = ?registry.tokens(), "Parser registry ready");
        Self {
            registry,
            summarizer,
            catalog,
            supported_models,
            metrics: Arc::new(RunMetrics::new()),
        }
    }

    /// Registered parsers.
    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Run the pipeline and return the processed file names.
    pub async fn process_directory(
        &self,
        request: &ProcessingRequest,
    ) -> Result<ProcessedSet, ProcessingError> {
        self.run(request).await.map(|report| report.processed)
    }

    /// Run the pipeline, record metrics, and return the full report.
    pub async fn run(&self, request: &ProcessingRequest) -> Result<RunReport, ProcessingError> {
        let pipeline = BatchPipeline::new(
            &self.registry,
            self.summarizer.as_ref(),
            self.catalog.as_ref(),
        );
        let report = pipeline.run(request).await?;
        self.metrics.record_run(&report);
        Ok(report)
    }

    /// Ordered catalog of selectable models.
    pub fn supported_models(&self) -> &SupportedModels {
        &self.supported_models
    }

    /// Return the current pipeline metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[async_trait]
impl ProcessingApi for ProcessingService {
    async fn process_directory(
        &self,
        request: ProcessingRequest,
    ) -> Result<ProcessedSet, ProcessingError> {
        ProcessingService::process_directory(self, &request).await
    }

    fn supported_models(&self) -> &SupportedModels {
        ProcessingService::supported_models(self)
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        ProcessingService::metrics_snapshot(self)
    }
}
