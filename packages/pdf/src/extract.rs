// ABOUTME: PDF signature validation, text extraction, and metadata reading
// ABOUTME: Extraction preserves page order and labels page boundaries

use lopdf::{Document, Object};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Not a valid PDF: missing %PDF signature")]
    InvalidSignature,

    #[error("Failed to parse PDF: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("PDF contains no extractable text")]
    NoText,
}

/// Checks the `%PDF` magic bytes without parsing the document.
pub fn validate_pdf(content: &[u8]) -> bool {
    content.starts_with(b"%PDF")
}

/// Extracts all text from a PDF, page by page in reading order. Pages with
/// no text are skipped; each kept page is preceded by a page banner.
pub fn extract_text(content: &[u8]) -> Result<String, PdfError> {
    if !validate_pdf(content) {
        return Err(PdfError::InvalidSignature);
    }

    let document = Document::load_mem(content)?;
    let page_count = document.get_pages().len();

    let mut pages = Vec::new();
    for (page_number, _) in document.get_pages() {
        match document.extract_text(&[page_number]) {
            Ok(text) if !text.trim().is_empty() => {
                pages.push(format!("--- Page {} ---\n{}", page_number, text.trim()));
            }
            Ok(_) => {}
            Err(e) => {
                warn!(page = page_number, error = %e, "failed to extract page text");
            }
        }
    }

    if pages.is_empty() {
        return Err(PdfError::NoText);
    }

    info!(pages = page_count, extracted = pages.len(), "PDF processed");
    Ok(pages.join("\n\n"))
}

#[derive(Debug, Clone, Default)]
pub struct PdfMetadata {
    pub num_pages: usize,
    pub has_text: bool,
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

/// Reads document metadata: page count, whether the first page has
/// extractable text, and the Info dictionary fields when present.
pub fn pdf_metadata(content: &[u8]) -> Result<PdfMetadata, PdfError> {
    if !validate_pdf(content) {
        return Err(PdfError::InvalidSignature);
    }

    let document = Document::load_mem(content)?;
    let pages = document.get_pages();

    let has_text = pages
        .keys()
        .next()
        .and_then(|first| document.extract_text(&[*first]).ok())
        .map(|text| !text.trim().is_empty())
        .unwrap_or(false);

    let mut metadata = PdfMetadata {
        num_pages: pages.len(),
        has_text,
        ..Default::default()
    };

    if let Some(info) = info_dict(&document) {
        metadata.title = info_string(&document, info, b"Title");
        metadata.author = info_string(&document, info, b"Author");
        metadata.subject = info_string(&document, info, b"Subject");
    }

    Ok(metadata)
}

fn info_dict(document: &Document) -> Option<&lopdf::Dictionary> {
    let info = document.trailer.get(b"Info").ok()?;
    match info {
        Object::Reference(id) => document.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn info_string(document: &Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    let object = match dict.get(key).ok()? {
        Object::Reference(id) => document.get_object(*id).ok()?,
        other => other,
    };
    match object {
        Object::String(bytes, _) => {
            let text = String::from_utf8_lossy(bytes).trim().to_string();
            (!text.is_empty()).then_some(text)
        }
        _ => None,
    }
}
