use std::path::Path;

use thiserror::Error;

pub mod backend;

pub use backend::{PdfBackend, RawDocument};
// Re-export domain types from core (canonical definitions live there)
pub use polidiff_core::{DocumentText, Slot};

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract one document's text using the given backend.
///
/// The raw byte buffer is not retained beyond the extraction call; the
/// result is the immutable [`DocumentText`] for that slot. Empty text
/// (image-only PDFs) is a valid result, not an error.
pub fn extract_document(path: &Path, backend: &dyn PdfBackend) -> Result<DocumentText, PdfError> {
    let raw = backend.extract(path)?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    tracing::debug!(
        source = %source,
        pages = raw.page_count,
        chars = raw.text.chars().count(),
        "extracted document text"
    );
    Ok(DocumentText::new(source, raw.text, raw.page_count))
}

/// Extract into a slot state, mapping failures into [`Slot::Failed`] so
/// one unreadable file never takes down the other slot.
pub fn load_slot(path: &Path, backend: &dyn PdfBackend) -> Slot {
    match extract_document(path, backend) {
        Ok(doc) => Slot::Ready(doc),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "PDF extraction failed");
            Slot::Failed(format!("não foi possível ler o arquivo: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Backend returning canned results, keyed by file stem.
    struct FakeBackend;

    impl PdfBackend for FakeBackend {
        fn extract(&self, path: &Path) -> Result<RawDocument, PdfError> {
            match path.file_stem().and_then(|s| s.to_str()) {
                Some("ok") => Ok(RawDocument {
                    text: "meta atuarial de 6% governança ".to_string(),
                    page_count: 2,
                }),
                Some("scan") => Ok(RawDocument {
                    text: " ".to_string(),
                    page_count: 1,
                }),
                _ => Err(PdfError::Open("cannot parse header".to_string())),
            }
        }
    }

    #[test]
    fn extract_document_carries_provenance() {
        let doc = extract_document(&PathBuf::from("/tmp/ok.pdf"), &FakeBackend).unwrap();
        assert_eq!(doc.source, "ok.pdf");
        assert_eq!(doc.pages, 2);
        assert_eq!(doc.chars, doc.text.chars().count());
        assert!(!doc.is_empty());
    }

    #[test]
    fn image_only_pdf_is_ready_and_empty() {
        let slot = load_slot(&PathBuf::from("scan.pdf"), &FakeBackend);
        assert!(slot.is_ready());
        assert!(slot.document().unwrap().is_empty());
    }

    #[test]
    fn unparseable_pdf_becomes_failed_slot() {
        let slot = load_slot(&PathBuf::from("corrupt.pdf"), &FakeBackend);
        assert!(!slot.is_ready());
        let reason = slot.failure().unwrap();
        assert!(reason.contains("não foi possível ler o arquivo"));
        assert!(reason.contains("cannot parse header"));
    }
}
