use std::path::Path;

use mupdf::{Document, TextPageFlags};

use polidiff_pdf::{PdfBackend, PdfError, RawDocument};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island — it isolates the mupdf dependency
/// (which is AGPL-3.0) so that non-PDF code paths do not transitively
/// depend on it.
///
/// Flattening follows the comparison contract: pages in order, text lines
/// within a page joined by single spaces, and a trailing space after each
/// page, so a topic phrase split across lines still matches.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract(&self, path: &Path) -> Result<RawDocument, PdfError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| PdfError::Open("invalid path encoding".into()))?;

        let document = Document::open(path_str).map_err(|e| PdfError::Open(e.to_string()))?;

        let mut text = String::new();
        let mut page_count = 0;

        for page_result in document
            .pages()
            .map_err(|e| PdfError::Extraction(e.to_string()))?
        {
            page_count += 1;
            let page = page_result.map_err(|e| PdfError::Extraction(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| PdfError::Extraction(e.to_string()))?;

            let mut fragments: Vec<String> = Vec::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    fragments.push(line_text);
                }
            }

            text.push_str(&fragments.join(" "));
            text.push(' ');
        }

        Ok(RawDocument { text, page_count })
    }
}
