//! Model Context Protocol (MCP) integration for the summarization service.
//!
//! This module wires the batch pipeline into an MCP server so editors and agent hosts can
//! summarize document folders over stdio. The surface area consists of:
//!
//! - Tools: `summarize-directory`, `list-models`, and `metrics`.
//! - Resources: `mcp://models` and `mcp://usage`.
//!
//! Handlers, schemas, and formatting helpers are kept in focused submodules.

mod format;
pub mod handlers;
mod registry;
mod schemas;
mod server;

pub use server::TextSummaryMcpServer;
