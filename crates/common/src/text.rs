//! Text helpers shared by ingestion and query paths

/// Lowercase and trim surrounding whitespace
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// True when the text has no content after normalization
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
