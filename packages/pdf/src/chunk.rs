// ABOUTME: Overlapping text chunking used before vector storage
// ABOUTME: Fixed character windows with carried-over context between chunks

use tracing::info;

/// Splits `text` into chunks of at most `chunk_size` characters, where each
/// chunk repeats the last `overlap` characters of the previous one so
/// context is not lost at chunk boundaries. Blank chunks are dropped.
///
/// `overlap` must be smaller than `chunk_size`; it is clamped otherwise.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }
    let overlap = overlap.min(chunk_size - 1);

    // Character-based windows; byte offsets would split multi-byte chars.
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        if !chunk.trim().is_empty() {
            chunks.push(chunk);
        }
        if end == chars.len() {
            break;
        }
        start = end - overlap;
    }

    info!(chunks = chunks.len(), "text chunked");
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_text_yields_single_chunk() {
        let chunks = chunk_text("hello world", 1000, 200);
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn chunks_overlap_by_requested_amount() {
        let text = "abcdefghij".repeat(30); // 300 chars
        let chunks = chunk_text(&text, 100, 20);

        assert!(chunks.len() > 1);
        for window in chunks.windows(2) {
            let len = window[0].chars().count();
            let prev_tail: String = window[0].chars().skip(len - 20).collect();
            assert!(window[1].starts_with(&prev_tail));
        }
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(chunk_text("", 100, 10).is_empty());
        assert!(chunk_text("    \n\n   ", 100, 10).is_empty());
    }

    #[test]
    fn multibyte_characters_do_not_panic() {
        let text = "cláusula de confidencialidad — número 3 ".repeat(50);
        let chunks = chunk_text(&text, 100, 20);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 100);
        }
    }

    #[test]
    fn overlap_larger_than_chunk_size_is_clamped() {
        let text = "x".repeat(50);
        let chunks = chunk_text(&text, 10, 50);
        // Must terminate and cover the text.
        assert!(chunks.len() >= 5);
    }
}
