//! Input manager routing documents to the matching extractor

use crate::error::{CvMatcherError, Result};
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::path::Path;

/// An uploaded document: an immutable byte payload plus its declared format.
/// Consumed once by text extraction; only the derived text is retained.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>, format: DocumentFormat) -> Self {
        Self { bytes, format }
    }
}

pub struct InputManager;

impl InputManager {
    /// Reads a file into a `RawDocument`, detecting the format from the
    /// extension unless an explicit format is supplied.
    pub async fn read_document(
        path: &Path,
        format_override: Option<DocumentFormat>,
    ) -> Result<RawDocument> {
        if !path.exists() {
            return Err(CvMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let format = match format_override {
            Some(format) => format,
            None => {
                let extension = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .ok_or_else(|| {
                        CvMatcherError::InvalidInput(format!(
                            "File has no extension: {}",
                            path.display()
                        ))
                    })?;

                DocumentFormat::from_extension(extension)
                    .ok_or_else(|| CvMatcherError::UnsupportedFormat(extension.to_string()))?
            }
        };

        let bytes = tokio::fs::read(path).await?;
        Ok(RawDocument::new(bytes, format))
    }

    /// Converts a document into plain text. Never fails: unreadable content
    /// yields an empty string, which callers treat as "could not extract".
    pub fn extract_text(document: &RawDocument) -> String {
        match document.format {
            DocumentFormat::Pdf => {
                info!("Extracting text from PDF document");
                PdfExtractor.extract(&document.bytes)
            }
            DocumentFormat::Docx => {
                info!("Extracting text from DOCX document");
                DocxExtractor.extract(&document.bytes)
            }
            DocumentFormat::PlainText | DocumentFormat::LegacyDoc => {
                info!("Decoding {} document as UTF-8", document.format.tag());
                PlainTextExtractor.extract(&document.bytes)
            }
        }
    }
}
