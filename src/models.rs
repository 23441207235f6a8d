//! Model catalog handling: the selectable model set and the pre-run availability check.
//!
//! Two catalogs are involved. [`SupportedModels`] is the ordered, process-wide list offered to
//! front ends for selection (its first entry is the default). The *availability* catalog is
//! whatever the model-serving backend reports as installed, obtained through [`ModelCatalog`]
//! once per run and checked with [`ensure_model_available`] before any file is touched.

use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

/// Built-in model identifiers, in selection order.
pub const DEFAULT_MODELS: [&str; 4] = [
    "gemma3:4b",
    "gemma3:1b",
    "llama3.2:3b",
    "deepseek-r1:1.5b",
];

/// Errors raised when constructing a [`SupportedModels`] catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog contained no identifiers.
    #[error("model catalog must contain at least one model")]
    Empty,
    /// An identifier appeared more than once.
    #[error("duplicate model identifier '{0}'")]
    Duplicate(String),
}

/// Requested model is not installed on the model-serving backend.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("model '{model}' is not available")]
pub struct ModelNotFoundError {
    /// Identifier that was requested.
    pub model: String,
}

/// Requested model is not part of the selectable catalog.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("model '{model}' is not supported; choose one of: {}", .supported.join(", "))]
pub struct UnsupportedModelError {
    /// Identifier that was requested.
    pub model: String,
    /// Selectable identifiers.
    pub supported: Vec<String>,
}

/// Ordered, unique, non-empty list of selectable model identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedModels(Vec<String>);

impl SupportedModels {
    /// Build a catalog, rejecting empty lists, blank entries, and duplicates.
    pub fn new<I, S>(ids: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut models = Vec::new();
        for id in ids {
            let id = id.into().trim().to_string();
            if id.is_empty() {
                continue;
            }
            if !seen.insert(id.clone()) {
                return Err(CatalogError::Duplicate(id));
            }
            models.push(id);
        }
        if models.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self(models))
    }

    /// Parse a comma-separated list such as the `SUPPORTED_MODELS` variable.
    pub fn parse_list(raw: &str) -> Result<Self, CatalogError> {
        Self::new(raw.split(','))
    }

    /// Catalog built from [`DEFAULT_MODELS`].
    pub fn builtin() -> Self {
        Self(DEFAULT_MODELS.iter().map(|id| id.to_string()).collect())
    }

    /// Default model (the first entry).
    pub fn default_model(&self) -> &str {
        &self.0[0]
    }

    /// Whether `model` is a selectable identifier.
    pub fn contains(&self, model: &str) -> bool {
        self.0.iter().any(|id| id == model)
    }

    /// Iterate over identifiers in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Borrow the identifiers as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Resolve a front-end selection: `None` picks the default, anything else must be listed.
    pub fn resolve(&self, requested: Option<&str>) -> Result<String, UnsupportedModelError> {
        match requested.map(str::trim).filter(|model| !model.is_empty()) {
            None => Ok(self.default_model().to_string()),
            Some(model) if self.contains(model) => Ok(model.to_string()),
            Some(model) => Err(UnsupportedModelError {
                model: model.to_string(),
                supported: self.0.clone(),
            }),
        }
    }
}

impl Default for SupportedModels {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The serving backend could not report its installed models.
#[derive(Debug, Error)]
#[error("model catalog unavailable: {0}")]
pub struct ModelCatalogError(pub String);

/// Capability that lists the models installed on the serving backend.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// Names of models currently available for inference.
    async fn list_models(&self) -> Result<Vec<String>, ModelCatalogError>;
}

/// Succeed when `model` is present in the `available` catalog.
///
/// Untagged identifiers also match the backend's implicit `:latest` tag, so `mistral` is
/// satisfied by an installed `mistral:latest`.
pub fn ensure_model_available(
    model: &str,
    available: &[String],
) -> Result<(), ModelNotFoundError> {
    let found = available.iter().any(|installed| {
        installed == model
            || (!model.contains(':')
                && installed
                    .strip_suffix(":latest")
                    .is_some_and(|base| base == model))
    });

    if found {
        Ok(())
    } else {
        Err(ModelNotFoundError {
            model: model.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_defaults_to_first_entry() {
        let models = SupportedModels::builtin();
        assert_eq!(models.default_model(), "gemma3:4b");
        assert_eq!(models.iter().count(), DEFAULT_MODELS.len());
        assert!(models.contains("llama3.2:3b"));
        assert!(!models.contains("gpt-4"));
    }

    #[test]
    fn parse_list_trims_and_keeps_order() {
        let models = SupportedModels::parse_list(" phi4 , mistral:7b,").expect("catalog");
        assert_eq!(models.as_slice(), &["phi4".to_string(), "mistral:7b".to_string()]);
        assert_eq!(models.default_model(), "phi4");
    }

    #[test]
    fn catalog_rejects_empty_and_duplicates() {
        assert_eq!(SupportedModels::parse_list(" , "), Err(CatalogError::Empty));
        assert_eq!(
            SupportedModels::new(["a", "b", "a"]),
            Err(CatalogError::Duplicate("a".into()))
        );
    }

    #[test]
    fn resolve_defaults_and_rejects_unknown() {
        let models = SupportedModels::builtin();
        assert_eq!(models.resolve(None).expect("default"), "gemma3:4b");
        assert_eq!(models.resolve(Some(" ")).expect("blank"), "gemma3:4b");
        assert_eq!(models.resolve(Some("gemma3:1b")).expect("listed"), "gemma3:1b");
        let error = models.resolve(Some("gpt-4")).expect_err("unlisted");
        assert_eq!(error.model, "gpt-4");
        assert!(error.to_string().contains("gemma3:4b, gemma3:1b"));
    }

    #[test]
    fn availability_check_matches_exact_and_latest_tag() {
        let installed = vec!["gemma3:4b".to_string(), "mistral:latest".to_string()];
        assert!(ensure_model_available("gemma3:4b", &installed).is_ok());
        assert!(ensure_model_available("mistral", &installed).is_ok());
        assert!(ensure_model_available("gemma3", &installed).is_err());
    }

    #[test]
    fn availability_check_names_missing_model() {
        let error = ensure_model_available("llama3.2:3b", &[]).expect_err("missing");
        assert_eq!(error.model, "llama3.2:3b");
        assert!(error.to_string().contains("llama3.2:3b"));
    }
}
