//! Core data types and error definitions for the batch pipeline.

use crate::{
    models::{ModelCatalogError, ModelNotFoundError},
    parsers::ExtractionError,
    summarization::SummarizationError,
};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use thiserror::Error;

/// Extension (without dot) given to every summary file.
pub const SUMMARY_EXTENSION: &str = "txt";

/// Names of source files that were summarized and written during one run.
pub type ProcessedSet = BTreeSet<String>;

/// Fatal errors that abort a run before any file is processed.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// Input location is missing or not a directory.
    #[error("Invalid input directory {path}: {reason}")]
    InvalidInput {
        /// Path supplied by the caller.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },
    /// Requested model is not installed on the backend.
    #[error(transparent)]
    ModelNotFound(#[from] ModelNotFoundError),
    /// The backend could not be asked which models are installed.
    #[error(transparent)]
    ModelCatalogUnavailable(#[from] ModelCatalogError),
    /// Output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectory {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Recoverable failure confined to a single file.
#[derive(Debug, Error)]
pub enum FileError {
    /// Text extraction failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// Summarization backend failed.
    #[error(transparent)]
    Summarization(#[from] SummarizationError),
    /// Writing the summary file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Target summary path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Parameters of a single pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingRequest {
    /// Model identifier used for every file in the run.
    pub model: String,
    /// Directory whose immediate entries are summarized.
    pub input_dir: PathBuf,
    /// Directory receiving `<stem>.txt` summaries; created when absent.
    pub output_dir: PathBuf,
}

impl ProcessingRequest {
    /// Bundle the run parameters.
    pub fn new(
        model: impl Into<String>,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            model: model.into(),
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Detailed account of a completed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Source file names summarized and written.
    pub processed: ProcessedSet,
    /// Source file names that failed, with the failure message.
    pub failed: BTreeMap<String, String>,
    /// Entries ignored because no parser is registered for their extension.
    pub skipped: usize,
}
