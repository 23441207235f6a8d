use super::ExtractionError;
use std::path::Path;

/// Read a UTF-8 text file verbatim.
pub fn extract_plain_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| ExtractionError::Encoding {
        path: path.display().to_string(),
    })?;
    // A leading BOM is noise for the model.
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}
