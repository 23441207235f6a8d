//! Batch document pipeline: discovery, extraction dispatch, summarization, and output.

mod pipeline;
mod service;
pub mod types;

pub use pipeline::{BatchPipeline, summary_path};
pub use service::{ProcessingApi, ProcessingService};
pub use types::{
    FileError, ProcessedSet, ProcessingError, ProcessingRequest, RunReport, SUMMARY_EXTENSION,
};
