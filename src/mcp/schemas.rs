//! JSON schema builders for MCP tools.

use crate::models::SupportedModels;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Arguments accepted by the `summarize-directory` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct SummarizeDirectoryArgs {
    /// Directory whose text and PDF files are summarized (not recursive).
    pub(crate) input_dir: String,
    /// Directory receiving one `<stem>.txt` summary per processed file; created when absent.
    pub(crate) output_dir: String,
    /// Model identifier; defaults to the first supported model.
    #[serde(default)]
    pub(crate) model: Option<String>,
}

/// Build the schema describing the `summarize-directory` tool input.
///
/// The derived schema is narrowed so `model` advertises the supported catalog as an enum.
pub(crate) fn summarize_directory_input_schema(models: &SupportedModels) -> Map<String, Value> {
    let root = schemars::schema_for!(SummarizeDirectoryArgs);
    let Ok(Value::Object(mut schema)) = serde_json::to_value(root) else {
        return empty_object_schema();
    };
    schema.remove("$schema");

    if let Some(Value::Object(model)) = schema
        .get_mut("properties")
        .and_then(|properties| properties.get_mut("model"))
    {
        model.insert("type".into(), Value::String("string".into()));
        model.insert(
            "enum".into(),
            Value::Array(
                models
                    .iter()
                    .map(|id| Value::String(id.to_string()))
                    .collect(),
            ),
        );
        model.insert(
            "default".into(),
            Value::String(models.default_model().to_string()),
        );
    }

    schema
}

/// Schema for tools that take no arguments.
pub(crate) fn empty_object_schema() -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(Map::new()));
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_schema_requires_directories_and_lists_models() {
        let schema = summarize_directory_input_schema(&SupportedModels::builtin());
        assert_eq!(schema["type"], "object");

        let required: Vec<&str> = schema["required"]
            .as_array()
            .expect("required")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"input_dir"));
        assert!(required.contains(&"output_dir"));
        assert!(!required.contains(&"model"));

        let model = &schema["properties"]["model"];
        assert_eq!(model["default"], "gemma3:4b");
        assert_eq!(model["enum"].as_array().expect("enum").len(), 4);
        assert!(
            schema["properties"]["input_dir"]["description"]
                .as_str()
                .expect("doc comment")
                .contains("not recursive")
        );
    }
}
