// ABOUTME: PDF handling for the storage agent
// ABOUTME: Signature validation, page-by-page text extraction, and chunking

pub mod chunk;
pub mod extract;

pub use chunk::chunk_text;
pub use extract::{extract_text, pdf_metadata, validate_pdf, PdfError, PdfMetadata};
