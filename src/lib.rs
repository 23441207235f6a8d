#![deny(missing_docs)]

//! Core library for the batch text summarization service.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Model Context Protocol server implementation.
pub mod mcp;
/// Pipeline run metrics.
pub mod metrics;
/// Selectable model catalog and availability checks.
pub mod models;
/// Extension-keyed text extractors.
pub mod parsers;
/// Batch document processing pipeline.
pub mod processing;
/// Summarization backends.
pub mod summarization;

#[cfg(test)]
mod test_support;
