//! Parser registry mapping file-extension tokens to text extractors.
//!
//! Tokens are lowercase and keep their leading dot (`.pdf`, `.txt`). The registry is built once
//! near process start and only read during a pipeline run; adding a format means registering
//! another extractor, never touching the orchestrator.

use std::{collections::HashMap, path::Path};
use thiserror::Error;

mod pdf;
mod text;

pub use pdf::extract_pdf;
pub use text::extract_plain_text;

/// Errors raised while turning a source file into plain text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The file could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Text content was not valid UTF-8.
    #[error("{path} is not valid UTF-8 text")]
    Encoding {
        /// Path of the offending file.
        path: String,
    },
    /// The document format could not be decoded.
    #[error("failed to extract text from {path}: {reason}")]
    Malformed {
        /// Path of the offending file.
        path: String,
        /// Parser-specific diagnostic.
        reason: String,
    },
}

/// Extraction function: read the file at the given path and return its full text.
pub type ExtractFn = fn(&Path) -> Result<String, ExtractionError>;

/// Lookup table from extension token to extractor.
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: HashMap<String, ExtractFn>,
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Registry with the plain-text and PDF extractors installed.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(".txt", extract_plain_text);
        registry.register(".md", extract_plain_text);
        registry.register(".pdf", extract_pdf);
        registry
    }

    /// Register `parser` for `token`, replacing any previous entry.
    ///
    /// The token is normalized to lowercase with a leading dot.
    pub fn register(&mut self, token: &str, parser: ExtractFn) {
        let token = token.trim().to_lowercase();
        let token = if token.starts_with('.') {
            token
        } else {
            format!(".{token}")
        };
        self.parsers.insert(token, parser);
    }

    /// Extractor registered for a lowercase token, if any.
    pub fn lookup(&self, token: &str) -> Option<ExtractFn> {
        self.parsers.get(token).copied()
    }

    /// Extractor for `path` based on its (case-insensitive) extension.
    pub fn parser_for(&self, path: &Path) -> Option<ExtractFn> {
        extension_token(path).and_then(|token| self.lookup(&token))
    }

    /// Registered tokens in sorted order.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("tokens", &self.tokens())
            .finish()
    }
}

/// Lowercase extension token (with leading dot) for `path`, or `None` when it has no extension.
pub fn extension_token(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixed_text(_path: &Path) -> Result<String, ExtractionError> {
        Ok("fixed".into())
    }

    #[test]
    fn extension_token_is_lowercased_with_dot() {
        assert_eq!(
            extension_token(&PathBuf::from("Report.PDF")).as_deref(),
            Some(".pdf")
        );
        assert_eq!(extension_token(&PathBuf::from("notes.tar.TXT")).as_deref(), Some(".txt"));
        assert_eq!(extension_token(&PathBuf::from("README")), None);
        assert_eq!(extension_token(&PathBuf::from(".bashrc")), None);
    }

    #[test]
    fn defaults_cover_text_and_pdf() {
        let registry = ParserRegistry::with_defaults();
        assert_eq!(registry.tokens(), vec![".md", ".pdf", ".txt"]);
        assert!(registry.parser_for(Path::new("paper.Pdf")).is_some());
        assert!(registry.parser_for(Path::new("image.png")).is_none());
    }

    #[test]
    fn register_normalizes_tokens() {
        let mut registry = ParserRegistry::new();
        registry.register("CSV", fixed_text);
        let parser = registry.lookup(".csv").expect("registered");
        assert_eq!(parser(Path::new("data.csv")).expect("text"), "fixed");
    }
}
