//! Text extraction for source documents.
//!
//! PDFs go through `pdf-extract` (pages joined with `\n`); `.txt`/`.md` files
//! are read directly with a lossy UTF-8 fallback.

use std::fs;
use std::path::Path;

use crate::traits::TextExtractor;
use crate::{Error, Result};

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn extraction_error(path: &Path, reason: impl ToString) -> Error {
    Error::Extraction { source_name: source_name(path), reason: reason.to_string() }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        // pdf-extract panics on some malformed inputs; treat that as a failed document
        let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_by_pages(path))
            .map_err(|_| extraction_error(path, "PDF parser panicked"))?
            .map_err(|e| extraction_error(path, e))?;
        tracing::debug!(source = %source_name(path), pages = pages.len(), "extracted PDF text");
        Ok(pages.join("\n"))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(content),
            Err(_) => {
                let bytes = fs::read(path).map_err(|e| extraction_error(path, e))?;
                Ok(String::from_utf8_lossy(&bytes).to_string())
            }
        }
    }
}

/// Dispatches to an extractor by file extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractorRegistry {
    pdf: PdfTextExtractor,
    plain: PlainTextExtractor,
}

impl ExtractorRegistry {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 3] = ["pdf", "txt", "md"];

    pub fn supports(path: &Path) -> bool {
        extension(path).is_some_and(|ext| Self::SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension().and_then(|s| s.to_str()).map(str::to_ascii_lowercase)
}

impl TextExtractor for ExtractorRegistry {
    fn extract(&self, path: &Path) -> Result<String> {
        match extension(path).as_deref() {
            Some("pdf") => self.pdf.extract(path),
            Some("txt") | Some("md") => self.plain.extract(path),
            _ => Err(extraction_error(path, "unsupported file type")),
        }
    }
}
