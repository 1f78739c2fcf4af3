// ABOUTME: Extracts the document identifier from free-form user text
// ABOUTME: Detection ladder: UUID, *.pdf filename, quoted name, verb phrase

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref UUID_RE: Regex = Regex::new(
        r"(?i)[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}"
    )
    .expect("invalid UUID regex");
    static ref PDF_NAME_RE: Regex =
        Regex::new(r"(?i)[\w\-\.]+\.pdf").expect("invalid filename regex");
    static ref QUOTED_RE: Regex =
        Regex::new(r#"["']([^"']{3,})["']"#).expect("invalid quote regex");
    static ref VERB_PHRASE_RE: Regex = Regex::new(
        r#"(?i)(?:analyze|review|examine|process|analiza(?:r)?|revisa(?:r)?|examina(?:r)?|procesa(?:r)?)\s+(?:the\s+|el\s+)?(?:document|contract|file|documento|contrato|archivo)?\s*(?:called|named|llamado|denominado|nombrado|con nombre)?\s*["']?([A-Za-z0-9_\-\.]{3,50})["']?"#
    )
    .expect("invalid verb phrase regex");
}

/// Words a verb-phrase match can capture that do not name a document.
const GENERIC_WORDS: &[&str] = &[
    "this", "that", "the", "a", "an", "it", "one", "me", "something", "anything", "everything",
    "contract", "document", "file", "pdf", "este", "esto", "ese", "eso", "el", "la", "lo", "un",
    "una", "algo", "todo", "contrato", "documento", "archivo",
];

/// Pulls a document id or name out of the user's request.
///
/// Tried in order of specificity: a full UUID wins over a `.pdf` filename,
/// which wins over a quoted name, which wins over a name following an
/// analysis verb. Returns None when nothing identifiable is present.
pub fn extract_document_query(user_text: &str) -> Option<String> {
    let text = user_text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(m) = UUID_RE.find(text) {
        return Some(m.as_str().to_lowercase());
    }

    if let Some(m) = PDF_NAME_RE.find(text) {
        return Some(m.as_str().to_string());
    }

    if let Some(caps) = QUOTED_RE.captures(text) {
        return Some(caps[1].trim().to_string());
    }

    if let Some(caps) = VERB_PHRASE_RE.captures(text) {
        let candidate = caps[1].trim();
        if !GENERIC_WORDS.contains(&candidate.to_lowercase().as_str()) {
            return Some(candidate.to_string());
        }
    }

    None
}

/// True when the text is exactly one UUID, meaning lookup should go by
/// document id instead of filename.
pub fn is_document_id(query: &str) -> bool {
    UUID_RE
        .find(query.trim())
        .map(|m| m.as_str().len() == query.trim().len())
        .unwrap_or(false)
}
