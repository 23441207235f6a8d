//! Tool handlers for the MCP server.

use rmcp::{ErrorData as McpError, model::JsonObject};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod models;
pub mod summarize;

/// Decode the arguments of `tool`; a missing argument object is treated as `{}`.
pub(crate) fn parse_arguments<T: DeserializeOwned>(
    tool: &str,
    arguments: Option<JsonObject>,
) -> Result<T, McpError> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default())).map_err(|err| {
        McpError::invalid_params(format!("Invalid arguments for {tool}: {err}"), None)
    })
}
