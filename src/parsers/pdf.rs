use super::ExtractionError;
use std::path::Path;

/// Extract the text layer of a PDF document.
///
/// `pdf-extract` can panic on malformed fonts or glyph tables, so the call is isolated with
/// `catch_unwind` and reported as [`ExtractionError::Malformed`].
pub fn extract_pdf(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(file = %path.display(), bytes = bytes.len(), "Extracting PDF text");

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(&bytes)
    }));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(error)) => Err(ExtractionError::Malformed {
            path: path.display().to_string(),
            reason: error.to_string(),
        }),
        Err(_) => Err(ExtractionError::Malformed {
            path: path.display().to_string(),
            reason: "PDF parser panicked (likely malformed fonts)".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").expect("write");

        let error = extract_pdf(&path).expect_err("malformed pdf");
        assert!(matches!(error, ExtractionError::Malformed { .. }));
    }
}
