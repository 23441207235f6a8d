//! Batch pipeline: discover files, extract, summarize, and write one summary per document.
//!
//! A run is validated up front (model availability, then the input directory) and only then
//! touches the filesystem. After that point every failure is confined to the file that caused
//! it: the error is logged, the file is left out of the [`ProcessedSet`], and the loop moves on.

use crate::{
    models::{ModelCatalog, ensure_model_available},
    parsers::{ExtractFn, ExtractionError, ParserRegistry},
    processing::types::{
        FileError, ProcessedSet, ProcessingError, ProcessingRequest, RunReport, SUMMARY_EXTENSION,
    },
    summarization::Summarizer,
};
use std::path::{Path, PathBuf};

/// Sequential batch pipeline over borrowed collaborators.
pub struct BatchPipeline<'a> {
    registry: &'a ParserRegistry,
    summarizer: &'a dyn Summarizer,
    catalog: &'a dyn ModelCatalog,
}

impl<'a> BatchPipeline<'a> {
    /// Assemble a pipeline from its parser registry, summarizer, and model catalog.
    pub fn new(
        registry: &'a ParserRegistry,
        summarizer: &'a dyn Summarizer,
        catalog: &'a dyn ModelCatalog,
    ) -> Self {
        Self {
            registry,
            summarizer,
            catalog,
        }
    }

    /// Summarize every supported file in `request.input_dir` and return the processed names.
    pub async fn process_directory(
        &self,
        request: &ProcessingRequest,
    ) -> Result<ProcessedSet, ProcessingError> {
        self.run(request).await.map(|report| report.processed)
    }

    /// Run the pipeline and return the full report, including failures and skipped entries.
    pub async fn run(&self, request: &ProcessingRequest) -> Result<RunReport, ProcessingError> {
        let ProcessingRequest {
            model,
            input_dir,
            output_dir,
        } = request;

        let available = self.catalog.list_models().await?;
        ensure_model_available(model, &available)?;
        validate_input_dir(input_dir).await?;
        let entries = list_entries(input_dir).await?;

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| ProcessingError::OutputDirectory {
                path: output_dir.clone(),
                source,
            })?;

        tracing::info!(
            model = %model,
            input_dir = %input_dir.display(),
            output_dir = %output_dir.display(),
            "Processing directory"
        );

        let mut report = RunReport::default();
        for path in entries {
            let name = file_name(&path);
            let Some(parser) = self.registry.parser_for(&path) else {
                tracing::debug!(file = %name, "Skipping unsupported file");
                report.skipped += 1;
                continue;
            };

            match self.process_file(model, &path, parser, output_dir).await {
                Ok(target) => {
                    tracing::info!(file = %name, output = %target.display(), "Summary written");
                    report.processed.insert(name);
                }
                Err(error) => {
                    tracing::error!(file = %name, error = %error, "Failed to process file");
                    report.failed.insert(name, error.to_string());
                }
            }
        }

        if report.processed.is_empty() {
            tracing::warn!(
                input_dir = %input_dir.display(),
                failed = report.failed.len(),
                skipped = report.skipped,
                "No files were processed"
            );
        } else {
            tracing::info!(
                processed = report.processed.len(),
                failed = report.failed.len(),
                skipped = report.skipped,
                "Directory processed"
            );
        }

        Ok(report)
    }

    async fn process_file(
        &self,
        model: &str,
        path: &Path,
        parser: ExtractFn,
        output_dir: &Path,
    ) -> Result<PathBuf, FileError> {
        let text = extract_blocking(parser, path).await?;
        let summary = self.summarizer.summarize(model, &text).await?;
        let target = summary_path(path, output_dir);
        tokio::fs::write(&target, summary)
            .await
            .map_err(|source| FileError::Write {
                path: target.clone(),
                source,
            })?;
        Ok(target)
    }
}

async fn validate_input_dir(input_dir: &Path) -> Result<(), ProcessingError> {
    let metadata = tokio::fs::metadata(input_dir)
        .await
        .map_err(|error| ProcessingError::InvalidInput {
            path: input_dir.to_path_buf(),
            reason: error.to_string(),
        })?;
    if !metadata.is_dir() {
        return Err(ProcessingError::InvalidInput {
            path: input_dir.to_path_buf(),
            reason: "not a directory".into(),
        });
    }
    Ok(())
}

/// Immediate entries of `dir` in filesystem order.
///
/// A directory that cannot be listed is a fatal input error, not an empty run.
async fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, ProcessingError> {
    let unreadable = |error: std::io::Error| ProcessingError::InvalidInput {
        path: dir.to_path_buf(),
        reason: format!("cannot list directory: {error}"),
    };

    let mut reader = tokio::fs::read_dir(dir).await.map_err(unreadable)?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await.map_err(unreadable)? {
        entries.push(entry.path());
    }
    Ok(entries)
}

/// Run a parser on the blocking pool; PDF extraction is CPU-bound.
async fn extract_blocking(parser: ExtractFn, path: &Path) -> Result<String, ExtractionError> {
    let owned = path.to_path_buf();
    tokio::task::spawn_blocking(move || parser(&owned))
        .await
        .map_err(|error| ExtractionError::Malformed {
            path: path.display().to_string(),
            reason: format!("extraction task failed: {error}"),
        })?
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Output location for the summary of `source`: `<output_dir>/<stem>.txt`.
pub fn summary_path(source: &Path, output_dir: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{stem}.{SUMMARY_EXTENSION}"))
}
