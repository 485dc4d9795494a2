//! Text extraction from resume and job description files

use crate::error::{Result, ScreenerError};
use log::{debug, info, warn};
use lopdf::Document;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract the text of every page, in page order.
    ///
    /// A page whose text cannot be decoded yields an empty string; only a
    /// document that cannot be opened at all is an error.
    pub fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| ScreenerError::Extraction(format!("Failed to open PDF: {}", e)))?;

        if doc.is_encrypted() {
            return Err(ScreenerError::Extraction(
                "PDF is encrypted and cannot be read".to_string(),
            ));
        }

        // get_pages is keyed by page number, so iteration follows page order
        let pages = doc.get_pages();
        let texts: Vec<String> = pages
            .keys()
            .map(|page_number| match doc.extract_text(&[*page_number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!("No text extracted from page {}: {}", page_number, e);
                    String::new()
                }
            })
            .collect();

        info!("Extracted text from {} PDF page(s)", texts.len());
        Ok(texts)
    }

    /// Concatenate the per-page text of a PDF held in memory
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        let text = self.extract_pages(bytes)?.concat();
        debug!("Extracted {} characters", text.len());
        Ok(text)
    }
}

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ScreenerError::Io)?;

        self.extract_bytes(&bytes).map_err(|e| match e {
            ScreenerError::Extraction(msg) => {
                ScreenerError::Extraction(format!("'{}': {}", path.display(), msg))
            }
            other => other,
        })
    }
}

/// Plain text and markdown job descriptions are passed through untouched
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(ScreenerError::Io)?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_pdf_bytes_fail() {
        let result = PdfExtractor.extract_bytes(b"Jane Doe, Software Engineer");
        assert!(matches!(result, Err(ScreenerError::Extraction(_))));
    }

    #[test]
    fn test_empty_bytes_fail() {
        let result = PdfExtractor.extract_pages(&[]);
        assert!(matches!(result, Err(ScreenerError::Extraction(_))));
    }

    #[test]
    fn test_header_only_pdf_fails() {
        let result = PdfExtractor.extract_bytes(b"%PDF-1.4\n%%EOF\n");
        assert!(result.is_err());
    }
}
