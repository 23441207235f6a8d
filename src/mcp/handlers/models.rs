//! Handlers for the model catalog and metrics tools.

use std::sync::Arc;

use crate::{mcp::format::models_payload, processing::ProcessingApi};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use serde_json::json;

/// Handle the `list-models` tool, returning selectable models and the default.
pub(crate) async fn handle_list_models(
    processing: &Arc<dyn ProcessingApi>,
) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::structured(models_payload(
        processing.supported_models(),
    )))
}

/// Handle the `metrics` tool, returning the pipeline counters.
pub(crate) async fn handle_metrics(
    processing: &Arc<dyn ProcessingApi>,
) -> Result<CallToolResult, McpError> {
    let snapshot = processing.metrics_snapshot();
    Ok(CallToolResult::structured(json!({
        "runsCompleted": snapshot.runs_completed,
        "filesSummarized": snapshot.files_summarized,
        "filesFailed": snapshot.files_failed,
        "entriesSkipped": snapshot.entries_skipped,
    })))
}
