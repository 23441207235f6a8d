//! HTTP surface for the text summarization service.
//!
//! This module exposes a compact Axum router:
//!
//! - `POST /summarize` – Summarize every supported file of `inputs.input_dir` into
//!   `inputs.output_dir` using `parameters.model`. Returns a text response whose value is the
//!   JSON array of processed file names.
//! - `GET /summarize/task_schema` – Input and parameter declarations for the summarize task.
//! - `GET /api/app_metadata` – Application name, author, version, and description.
//! - `GET /api/routes` – Machine-readable route catalog for discovery by hosts.
//! - `GET /models` – Selectable models and the default.
//! - `GET /metrics` – Pipeline counters.
//!
//! The HTTP surface shares the same processing pipeline with the CLI and MCP server, so behavior
//! is identical across interfaces.

use crate::metrics::MetricsSnapshot;
use crate::models::UnsupportedModelError;
use crate::processing::{ProcessingApi, ProcessingError, ProcessingRequest};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

const APP_NAME: &str = "Text Summarization";
const APP_AUTHOR: &str = "UMass Rescue";
const APP_INFO: &str = "Summarize text and PDF files in a directory.";

/// Build the HTTP router exposing the summarization API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: ProcessingApi + 'static,
{
    Router::new()
        .route("/summarize", post(summarize::<S>))
        .route("/summarize/task_schema", get(task_schema::<S>))
        .route("/api/app_metadata", get(app_metadata))
        .route("/api/routes", get(list_routes))
        .route("/models", get(list_models::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .with_state(service)
}

/// Directory reference supplied as a task input.
#[derive(Debug, Deserialize)]
struct DirectoryInput {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct SummarizeInputs {
    input_dir: DirectoryInput,
    output_dir: DirectoryInput,
}

#[derive(Debug, Default, Deserialize)]
struct SummarizeParameters {
    #[serde(default)]
    model: Option<String>,
}

/// Request body for the `POST /summarize` endpoint.
#[derive(Debug, Deserialize)]
struct SummarizeRequest {
    inputs: SummarizeInputs,
    #[serde(default)]
    parameters: SummarizeParameters,
}

/// Text response carrying the processed file names as a JSON array string.
#[derive(Debug, Serialize)]
struct TextResponse {
    output_type: &'static str,
    value: String,
}

/// Summarize a directory.
///
/// The model defaults to the first entry of the supported catalog and must be one of its
/// members. Pre-flight failures map to 4xx/5xx responses; per-file failures never surface here.
async fn summarize<S>(
    State(service): State<Arc<S>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<TextResponse>, AppError>
where
    S: ProcessingApi,
{
    let SummarizeRequest { inputs, parameters } = request;
    let model = service
        .supported_models()
        .resolve(parameters.model.as_deref())?;
    let request = ProcessingRequest::new(model, inputs.input_dir.path, inputs.output_dir.path);
    tracing::info!(
        model = %request.model,
        input_dir = %request.input_dir.display(),
        output_dir = %request.output_dir.display(),
        "Summarize request received"
    );

    let processed = service.process_directory(request).await?;
    let names: Vec<&String> = processed.iter().collect();
    let value = serde_json::to_string(&names)?;
    tracing::info!(processed = processed.len(), "Summarize request completed");

    Ok(Json(TextResponse {
        output_type: "text",
        value,
    }))
}

#[derive(Serialize)]
struct InputSchema {
    key: &'static str,
    label: &'static str,
    input_type: &'static str,
}

#[derive(Serialize)]
struct EnumValue {
    key: String,
    label: String,
}

#[derive(Serialize)]
struct EnumParameterDescriptor {
    parameter_type: &'static str,
    enum_vals: Vec<EnumValue>,
    default: String,
}

#[derive(Serialize)]
struct ParameterSchema {
    key: &'static str,
    label: &'static str,
    subtitle: &'static str,
    value: EnumParameterDescriptor,
}

/// Response body for `GET /summarize/task_schema`.
#[derive(Serialize)]
struct TaskSchema {
    inputs: Vec<InputSchema>,
    parameters: Vec<ParameterSchema>,
}

/// Describe the summarize task: two directory inputs and the model enum parameter.
async fn task_schema<S>(State(service): State<Arc<S>>) -> Json<TaskSchema>
where
    S: ProcessingApi,
{
    let models = service.supported_models();
    Json(TaskSchema {
        inputs: vec![
            InputSchema {
                key: "input_dir",
                label: "Path to the directory containing the input files",
                input_type: "directory",
            },
            InputSchema {
                key: "output_dir",
                label: "Path to the directory containing the output files",
                input_type: "directory",
            },
        ],
        parameters: vec![ParameterSchema {
            key: "model",
            label: "Model to use for summarization",
            subtitle: "Model to use for summarization",
            value: EnumParameterDescriptor {
                parameter_type: "enum",
                enum_vals: models
                    .iter()
                    .map(|model| EnumValue {
                        key: model.to_string(),
                        label: model.to_string(),
                    })
                    .collect(),
                default: models.default_model().to_string(),
            },
        }],
    })
}

/// Response body for `GET /api/app_metadata`.
#[derive(Serialize)]
struct AppMetadata {
    name: &'static str,
    author: &'static str,
    version: &'static str,
    info: &'static str,
}

async fn app_metadata() -> Json<AppMetadata> {
    Json(AppMetadata {
        name: APP_NAME,
        author: APP_AUTHOR,
        version: env!("CARGO_PKG_VERSION"),
        info: APP_INFO,
    })
}

/// Descriptor for a single route in the discovery catalog.
#[derive(Serialize)]
struct RouteDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /api/routes`.
#[derive(Serialize)]
struct RoutesResponse {
    routes: Vec<RouteDescriptor>,
}

/// Enumerate supported HTTP routes for discovery/UX in hosts and tools.
async fn list_routes() -> Json<RoutesResponse> {
    Json(RoutesResponse {
        routes: vec![
            RouteDescriptor {
                name: "summarize",
                method: "POST",
                path: "/summarize",
                description: "Summarize text and PDF files in a directory; writes <stem>.txt per file and returns the processed file names.",
                request_example: Some(json!({
                    "inputs": {
                        "input_dir": { "path": "/data/documents" },
                        "output_dir": { "path": "/data/summaries" }
                    },
                    "parameters": { "model": "gemma3:4b" }
                })),
            },
            RouteDescriptor {
                name: "task_schema",
                method: "GET",
                path: "/summarize/task_schema",
                description: "Describe the inputs and parameters accepted by the summarize task.",
                request_example: None,
            },
            RouteDescriptor {
                name: "models",
                method: "GET",
                path: "/models",
                description: "List selectable summarization models and the default.",
                request_example: None,
            },
            RouteDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return run and file counters since startup.",
                request_example: None,
            },
        ],
    })
}

/// Response body for `GET /models`.
#[derive(Serialize)]
struct ModelsResponse {
    models: Vec<String>,
    default: String,
}

async fn list_models<S>(State(service): State<Arc<S>>) -> Json<ModelsResponse>
where
    S: ProcessingApi,
{
    let models = service.supported_models();
    Json(ModelsResponse {
        models: models.as_slice().to_vec(),
        default: models.default_model().to_string(),
    })
}

/// Return the pipeline counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: ProcessingApi,
{
    Json(service.metrics_snapshot())
}

enum AppError {
    UnsupportedModel(UnsupportedModelError),
    Processing(ProcessingError),
    Encoding(serde_json::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedModel(_) => StatusCode::BAD_REQUEST,
            Self::Processing(ProcessingError::InvalidInput { .. }) => StatusCode::BAD_REQUEST,
            Self::Processing(ProcessingError::ModelNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Processing(ProcessingError::ModelCatalogUnavailable(_)) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Processing(ProcessingError::OutputDirectory { .. }) | Self::Encoding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            Self::UnsupportedModel(error) => error.to_string(),
            Self::Processing(error) => error.to_string(),
            Self::Encoding(error) => format!("failed to encode processed files: {error}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        tracing::warn!(status = status.as_u16(), error = %message, "Summarize request rejected");
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ProcessingError> for AppError {
    fn from(inner: ProcessingError) -> Self {
        Self::Processing(inner)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(inner: serde_json::Error) -> Self {
        Self::Encoding(inner)
    }
}

impl From<UnsupportedModelError> for AppError {
    fn from(inner: UnsupportedModelError) -> Self {
        Self::UnsupportedModel(inner)
    }
}
