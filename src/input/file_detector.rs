//! Document format detection

/// Closed set of document formats the extractor understands.
///
/// `from_tag` accepts the wire tags used by upload clients; `from_extension`
/// additionally maps the usual file extensions onto them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
    LegacyDoc,
}

impl DocumentFormat {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "plaintext" => Some(DocumentFormat::PlainText),
            "legacy-doc" => Some(DocumentFormat::LegacyDoc),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" => Some(DocumentFormat::PlainText),
            "doc" => Some(DocumentFormat::LegacyDoc),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::PlainText => "plaintext",
            DocumentFormat::LegacyDoc => "legacy-doc",
        }
    }
}
