//! Command-line entrypoint: summarize a directory once and print the processed file names.
use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use text_summary::{
    config, logging,
    processing::{ProcessingRequest, ProcessingService},
};

#[derive(Parser)]
#[command(
    name = "text-summary-cli",
    version,
    about = "Summarize the text and PDF files of a directory with a local model"
)]
struct Cli {
    /// Directory containing the documents to summarize.
    #[arg(long, required_unless_present = "list_models")]
    input_dir: Option<PathBuf>,
    /// Directory receiving one <stem>.txt summary per document.
    #[arg(long, required_unless_present = "list_models")]
    output_dir: Option<PathBuf>,
    /// Model to use for summarization (defaults to the first supported model).
    #[arg(long)]
    model: Option<String>,
    /// Print the supported models and exit.
    #[arg(long)]
    list_models: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::init_config().context("failed to load configuration")?;
    logging::init_tracing_with(logging::ConsoleTarget::Stderr);

    if cli.list_models {
        let default = config.supported_models.default_model();
        for model in config.supported_models.iter() {
            if model == default {
                println!("{model} (default)");
            } else {
                println!("{model}");
            }
        }
        return Ok(());
    }

    let (Some(input_dir), Some(output_dir)) = (cli.input_dir, cli.output_dir) else {
        anyhow::bail!("--input-dir and --output-dir are required");
    };
    let model = config.supported_models.resolve(cli.model.as_deref())?;

    let service =
        ProcessingService::new(config).context("failed to construct the Ollama client")?;
    let request = ProcessingRequest::new(model, input_dir, output_dir);
    let processed = service
        .process_directory(&request)
        .await
        .with_context(|| format!("failed to summarize {}", request.input_dir.display()))?;

    println!("{}", serde_json::to_string(&processed)?);
    Ok(())
}
