use std::path::Path;

use crate::PdfError;

/// Raw output of a backend extraction: the flattened text plus the page
/// count it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub text: String,
    pub page_count: usize,
}

/// Trait for PDF text extraction backends.
///
/// Implementors produce one flattened string per document: pages in order,
/// text fragments within a page joined by single spaces, and a trailing
/// space after each page. Higher-level handling (slot lifecycle, error
/// surfacing) lives in [`crate::extract_document`] and [`crate::load_slot`].
pub trait PdfBackend: Send + Sync {
    /// Extract the full text content of a PDF file.
    fn extract(&self, path: &Path) -> Result<RawDocument, PdfError>;
}
