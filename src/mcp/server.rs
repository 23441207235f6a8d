//! MCP server bootstrap and request dispatch.

use std::{borrow::Cow, sync::Arc};

use crate::{
    mcp::{
        format::{json_resource_contents, models_payload, serialize_json},
        handlers::{
            models::{handle_list_models, handle_metrics},
            summarize::handle_summarize_directory,
        },
        registry, schemas,
    },
    processing::ProcessingApi,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::{
        AnnotateAble, CallToolRequestParam, CallToolResult, ListResourcesResult, ListToolsResult,
        RawResource, ReadResourceRequestParam, ReadResourceResult, Resource, ServerCapabilities,
        ServerInfo, Tool, ToolAnnotations,
    },
};

const MODELS_URI: &str = "mcp://models";
const USAGE_URI: &str = "mcp://usage";

/// MCP server implementation exposing the batch summarization pipeline.
#[derive(Clone)]
pub struct TextSummaryMcpServer {
    processing: Arc<dyn ProcessingApi>,
    registry: Arc<registry::Registry>,
}

impl TextSummaryMcpServer {
    /// Create a new MCP server using the supplied processing pipeline.
    pub fn new(processing: Arc<dyn ProcessingApi>) -> Self {
        let mut registry = registry::Registry::new();
        registry.register_resource(MODELS_URI, resource_models);
        registry.register_resource(USAGE_URI, resource_usage);

        registry.register_tool("summarize-directory", tool_summarize_directory);
        registry.register_tool("list-models", tool_list_models);
        registry.register_tool("metrics", tool_metrics);
        tracing::debug!(tools = ?registry.tool_names(), "Registered MCP tools");

        Self {
            processing,
            registry: Arc::new(registry),
        }
    }

    fn describe_tools(&self) -> Vec<Tool> {
        let summarize_schema = Arc::new(schemas::summarize_directory_input_schema(
            self.processing.supported_models(),
        ));
        vec![
            Tool {
                name: Cow::Borrowed("summarize-directory"),
                title: Some("Summarize Directory".to_string()),
                description: Some(Cow::Borrowed(
                    "Summarize every text and PDF file in a directory; writes <stem>.txt per file into output_dir and returns the processed file names. Files that fail are skipped, not fatal.",
                )),
                input_schema: summarize_schema,
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Summarize Directory")
                        .destructive(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed("list-models"),
                title: Some("List Models".to_string()),
                description: Some(Cow::Borrowed(
                    "See which summarization models can be selected and which one is the default.",
                )),
                input_schema: Arc::new(schemas::empty_object_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("List Models")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed("metrics"),
                title: Some("Metrics Snapshot".to_string()),
                description: Some(Cow::Borrowed(
                    "Check how many runs completed and how many files were summarized, failed, or skipped.",
                )),
                input_schema: Arc::new(schemas::empty_object_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Metrics Snapshot")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
        ]
    }

    fn describe_resources(&self) -> Vec<Resource> {
        let mut models = RawResource::new(MODELS_URI, "models");
        models.description = Some("Selectable summarization models and the default".into());

        let mut usage = RawResource::new(USAGE_URI, "usage");
        usage.description = Some(
            "Recommended tool flow: list-models → summarize-directory, then read <stem>.txt files from output_dir."
                .into(),
        );

        vec![models.no_annotation(), usage.no_annotation()]
    }
}

fn resource_models(
    server: &TextSummaryMcpServer,
    _request: ReadResourceRequestParam,
) -> registry::ResourceFuture {
    let payload = models_payload(server.processing.supported_models());
    Box::pin(async move {
        Ok(ReadResourceResult {
            contents: vec![json_resource_contents(
                MODELS_URI,
                serialize_json(&payload, MODELS_URI),
            )],
        })
    })
}

fn resource_usage(
    _server: &TextSummaryMcpServer,
    _request: ReadResourceRequestParam,
) -> registry::ResourceFuture {
    Box::pin(async move {
        let usage = serde_json::json!({
            "title": "Text Summary MCP Usage",
            "policy": [
                "Point input_dir at a folder of .txt, .md, or .pdf files; subfolders are ignored.",
                "Summaries overwrite <stem>.txt files of the same name in output_dir.",
                "A file that fails extraction or summarization is left out of `processed`.",
            ],
            "flows": [
                {
                    "name": "Summarize a folder",
                    "steps": [
                        "list-models()",
                        "summarize-directory({ input_dir, output_dir, model? })"
                    ]
                }
            ]
        });
        Ok(ReadResourceResult {
            contents: vec![json_resource_contents(
                USAGE_URI,
                serialize_json(&usage, USAGE_URI),
            )],
        })
    })
}

fn tool_summarize_directory(
    server: &TextSummaryMcpServer,
    request: CallToolRequestParam,
) -> registry::ToolFuture {
    let processing = server.processing.clone();
    Box::pin(async move { handle_summarize_directory(&processing, request.arguments).await })
}

fn tool_list_models(
    server: &TextSummaryMcpServer,
    _request: CallToolRequestParam,
) -> registry::ToolFuture {
    let processing = server.processing.clone();
    Box::pin(async move { handle_list_models(&processing).await })
}

fn tool_metrics(
    server: &TextSummaryMcpServer,
    _request: CallToolRequestParam,
) -> registry::ToolFuture {
    let processing = server.processing.clone();
    Box::pin(async move { handle_metrics(&processing).await })
}

impl ServerHandler for TextSummaryMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut implementation = rmcp::model::Implementation::from_build_env();
        implementation.name = "text-summary".to_string();
        implementation.title = Some("Text Summary MCP".to_string());
        implementation.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: implementation,
            instructions: Some(
                "Use this server to summarize folders of text and PDF documents with a local model. Each processed file gets a <stem>.txt summary in the output directory.".into(),
            ),
            ..ServerInfo::default()
        }
    }

    fn list_resources(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        let resources = self.describe_resources();
        std::future::ready(Ok(ListResourcesResult::with_all_items(resources)))
    }

    fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools = self.describe_tools();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            if let Some(handler) = self.registry.resource(request.uri.as_str()) {
                return handler(self, request).await;
            }

            Err(McpError::invalid_params(
                format!("Unknown resource URI: {}", request.uri),
                None,
            ))
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            if let Some(handler) = self.registry.tool(request.name.as_ref()) {
                return handler(self, request).await;
            }

            Err(McpError::invalid_params(
                format!("Unknown tool: {}", request.name),
                None,
            ))
        }
    }
}
