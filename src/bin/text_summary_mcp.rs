//! MCP server entrypoint (stdio transport).
//!
//! Launches an MCP server that exposes the summarization pipeline over stdio. This mode is
//! designed for editor/agent integrations and shares all runtime configuration with the HTTP
//! binary. Logs go to stderr so stdout carries only protocol frames.
use anyhow::{Context, Result};
use rmcp::{service::ServiceExt, transport::stdio};
use std::sync::Arc;
use text_summary::{config, logging, mcp::TextSummaryMcpServer, processing};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::init_config().context("failed to load configuration")?;
    logging::init_tracing_with(logging::ConsoleTarget::Stderr);

    let processing = Arc::new(
        processing::ProcessingService::new(config)
            .context("failed to construct the Ollama client")?,
    );
    let server = TextSummaryMcpServer::new(processing);

    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server over stdio")?;

    service
        .waiting()
        .await
        .context("MCP server terminated unexpectedly")?;

    Ok(())
}
