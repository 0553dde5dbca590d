//! Document preprocessing: whitespace normalization and fixed-size chunking.

/// Collapse all whitespace runs to single spaces and trim the ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split cleaned text into chunks of at most `chunk_size` characters, each
/// chunk overlapping the previous one by `overlap` characters. A
/// non-positive chunk size returns the text as a single chunk.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if chunk_size == 0 {
        return vec![text.to_string()];
    }

    let cleaned = clean_text(text);
    let chars: Vec<char> = cleaned.chars().collect();
    if chars.len() <= chunk_size {
        return vec![cleaned];
    }

    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  a\t b\n\nc  "), "a b c");
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        assert_eq!(chunk_text("hello world", 100, 10), vec!["hello world"]);
    }

    #[test]
    fn test_chunks_overlap() {
        let chunks = chunk_text("abcdefghij", 4, 2);
        assert_eq!(chunks, vec!["abcd", "cdef", "efgh", "ghij"]);
    }

    #[test]
    fn test_final_partial_chunk_is_kept() {
        let chunks = chunk_text("abcdefg", 4, 0);
        assert_eq!(chunks, vec!["abcd", "efg"]);
    }

    #[test]
    fn test_zero_chunk_size_returns_whole_text() {
        assert_eq!(chunk_text("raw  text", 0, 0), vec!["raw  text"]);
    }
}
