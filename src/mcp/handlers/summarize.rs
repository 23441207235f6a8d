//! Handler for the `summarize-directory` MCP tool.

use std::sync::Arc;

use crate::{
    mcp::schemas::SummarizeDirectoryArgs,
    processing::{ProcessingApi, ProcessingError, ProcessingRequest},
};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject},
};
use serde_json::json;

use super::parse_arguments;

/// Handle the `summarize-directory` tool invocation.
pub(crate) async fn handle_summarize_directory(
    processing: &Arc<dyn ProcessingApi>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let args: SummarizeDirectoryArgs = parse_arguments("summarize-directory", arguments)?;
    if args.input_dir.trim().is_empty() {
        return Err(McpError::invalid_params(
            "`input_dir` must not be empty",
            None,
        ));
    }
    if args.output_dir.trim().is_empty() {
        return Err(McpError::invalid_params(
            "`output_dir` must not be empty",
            None,
        ));
    }

    let model = processing
        .supported_models()
        .resolve(args.model.as_deref())
        .map_err(|err| McpError::invalid_params(err.to_string(), None))?;

    let request = ProcessingRequest::new(model.clone(), args.input_dir, args.output_dir);
    let output_dir = request.output_dir.display().to_string();
    let processed = processing
        .process_directory(request)
        .await
        .map_err(map_processing_error)?;

    Ok(CallToolResult::structured(json!({
        "status": "ok",
        "model": model,
        "outputDir": output_dir,
        "processedCount": processed.len(),
        "processed": processed,
    })))
}

fn map_processing_error(error: ProcessingError) -> McpError {
    match error {
        ProcessingError::InvalidInput { .. } | ProcessingError::ModelNotFound(_) => {
            McpError::invalid_params(error.to_string(), None)
        }
        ProcessingError::ModelCatalogUnavailable(_) | ProcessingError::OutputDirectory { .. } => {
            McpError::internal_error(error.to_string(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelCatalogError, ModelNotFoundError};
    use rmcp::model::ErrorCode;

    #[test]
    fn pre_flight_errors_map_to_error_codes() {
        let invalid = map_processing_error(ProcessingError::InvalidInput {
            path: "/missing".into(),
            reason: "not found".into(),
        });
        assert_eq!(invalid.code, ErrorCode::INVALID_PARAMS);

        let missing_model = map_processing_error(ProcessingError::ModelNotFound(
            ModelNotFoundError {
                model: "phi4".into(),
            },
        ));
        assert_eq!(missing_model.code, ErrorCode::INVALID_PARAMS);
        assert!(missing_model.message.contains("phi4"));

        let offline = map_processing_error(ProcessingError::ModelCatalogUnavailable(
            ModelCatalogError("refused".into()),
        ));
        assert_eq!(offline.code, ErrorCode::INTERNAL_ERROR);
    }
}
