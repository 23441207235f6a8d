//! Formatting helpers shared across MCP handlers and resources.

use crate::models::SupportedModels;
use rmcp::model::ResourceContents;
use serde::Serialize;
use serde_json::{Value, json};

pub(crate) const APPLICATION_JSON: &str = "application/json";

/// Payload describing the selectable models and the default.
pub(crate) fn models_payload(models: &SupportedModels) -> Value {
    json!({
        "models": models.as_slice(),
        "default": models.default_model(),
    })
}

/// Serialize a value to JSON, falling back to compact formatting on error.
pub(crate) fn serialize_json<T: Serialize>(value: &T, context_uri: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|error| {
        tracing::warn!(uri = context_uri, %error, "Failed to serialize JSON prettily");
        serde_json::to_string(value).unwrap_or_else(|_| "{}".into())
    })
}

/// Build JSON resource contents for MCP resource responses.
pub(crate) fn json_resource_contents(uri: &str, text: String) -> ResourceContents {
    ResourceContents::TextResourceContents {
        uri: uri.to_string(),
        mime_type: Some(APPLICATION_JSON.into()),
        text,
        meta: None,
    }
}
