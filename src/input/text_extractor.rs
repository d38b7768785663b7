//! Text extraction from various document formats
//!
//! Every extractor is total: a document that cannot be read yields an empty
//! string, not an error. The caller decides whether an empty result is a
//! rejection condition.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use log::warn;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> String;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    /// Extracts text page by page, newline-joined in page order. A page
    /// without any text contributes an empty line.
    fn extract(&self, bytes: &[u8]) -> String {
        match pdf_extract::extract_text_from_mem_by_pages(bytes) {
            Ok(pages) => pages.join("\n"),
            Err(e) => {
                warn!("PDF text extraction failed: {}", e);
                String::new()
            }
        }
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    /// Extracts paragraph text in document order, newline-joined.
    fn extract(&self, bytes: &[u8]) -> String {
        let docx = match read_docx(bytes) {
            Ok(docx) => docx,
            Err(e) => {
                warn!("DOCX text extraction failed: {}", e);
                return String::new();
            }
        };

        let mut paragraphs = Vec::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                let mut line = String::new();
                for paragraph_child in &paragraph.children {
                    if let ParagraphChild::Run(run) = paragraph_child {
                        for run_child in &run.children {
                            if let RunChild::Text(text) = run_child {
                                line.push_str(&text.text);
                            }
                        }
                    }
                }
                paragraphs.push(line);
            }
        }

        paragraphs.join("\n")
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    /// Decodes the payload as UTF-8; a decode error counts as extraction
    /// failure.
    fn extract(&self, bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(e) => {
                warn!("Plain text decode failed: {}", e);
                String::new()
            }
        }
    }
}
