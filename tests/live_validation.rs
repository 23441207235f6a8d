use std::sync::Once;

use text_summary::{
    config,
    models::{ModelCatalog, ensure_model_available},
    processing::{ProcessingRequest, ProcessingService},
    summarization::OllamaClient,
};

static INIT: Once = Once::new();

fn init_config_once() -> &'static config::Config {
    INIT.call_once(|| {
        config::init_config().expect("configuration");
    });
    config::get_config()
}

#[tokio::test]
#[ignore = "Requires live Ollama"]
async fn live_default_model_is_installed() {
    let config = init_config_once();
    let client = OllamaClient::from_config(config).expect("client");
    let installed = client.list_models().await.expect("Ollama should list models");
    let default = config.supported_models.default_model();
    ensure_model_available(default, &installed)
        .unwrap_or_else(|err| panic!("default model must be pulled: {err}"));
}

#[tokio::test]
#[ignore = "Requires live Ollama"]
async fn live_directory_roundtrip() {
    let config = init_config_once();
    let input = tempfile::tempdir().expect("input");
    let output = tempfile::tempdir().expect("output");
    std::fs::write(
        input.path().join("article.txt"),
        "Rust is a systems programming language focused on safety, speed, and concurrency. \
         It achieves memory safety without garbage collection through its ownership model.",
    )
    .expect("write");

    let service = ProcessingService::new(config).expect("service");
    let request = ProcessingRequest::new(
        config.supported_models.default_model(),
        input.path(),
        output.path(),
    );
    let processed = service.process_directory(&request).await.expect("run");

    assert!(processed.contains("article.txt"), "expected summary: {processed:?}");
    let summary = std::fs::read_to_string(output.path().join("article.txt")).expect("summary");
    assert!(!summary.trim().is_empty());
}
