use crate::config::ChunkerConfig;

/// Split a document into candidate paragraphs.
///
/// Only the first `doc_max_length` chars are considered. The document is
/// split on line boundaries and lines whose char count is not strictly
/// greater than `min_paragraph_length` are dropped. An empty result is a
/// valid outcome.
pub fn split_paragraphs(text: &str, config: &ChunkerConfig) -> Vec<String> {
    let text = truncate_chars(text, config.doc_max_length);

    let paragraphs: Vec<String> = text
        .split('\n')
        .filter(|line| line.chars().count() > config.min_paragraph_length)
        .map(str::to_string)
        .collect();

    log::debug!(
        "Split {} chars into {} paragraphs",
        text.chars().count(),
        paragraphs.len()
    );

    paragraphs
}

/// Truncate to at most `max_chars` characters, respecting char boundaries
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(min_len: usize, max_len: usize) -> ChunkerConfig {
        ChunkerConfig {
            min_paragraph_length: min_len,
            doc_max_length: max_len,
            ..Default::default()
        }
    }

    #[test]
    fn test_short_lines_are_dropped() {
        let text = "alpha beta gamma content long enough\nshort\nanother sufficiently long paragraph";
        let paragraphs = split_paragraphs(text, &config(10, 100_000));

        assert_eq!(
            paragraphs,
            vec![
                "alpha beta gamma content long enough".to_string(),
                "another sufficiently long paragraph".to_string(),
            ]
        );
    }

    #[test]
    fn test_boundary_length_is_strict() {
        // Exactly min_paragraph_length chars is not enough
        let text = "1234567890\n12345678901";
        let paragraphs = split_paragraphs(text, &config(10, 100_000));
        assert_eq!(paragraphs, vec!["12345678901".to_string()]);
    }

    #[test]
    fn test_all_filtered_yields_empty() {
        let paragraphs = split_paragraphs("a\nbb\nccc", &config(10, 100_000));
        assert!(paragraphs.is_empty());
    }

    #[test]
    fn test_truncation_applies_before_split() {
        // 40-char cap cuts the second line short enough to drop it
        let text = format!("{}\n{}", "x".repeat(30), "y".repeat(30));
        let paragraphs = split_paragraphs(&text, &config(10, 40));

        assert_eq!(paragraphs, vec!["x".repeat(30)]);
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        // Multibyte chars must not be split mid-encoding
        let text = "é".repeat(50);
        let paragraphs = split_paragraphs(&text, &config(10, 40));

        assert_eq!(paragraphs, vec!["é".repeat(40)]);
    }

    #[test]
    fn test_lines_are_kept_verbatim() {
        // No trimming: surrounding whitespace counts toward length
        let text = "  padded line that is long enough  ";
        let paragraphs = split_paragraphs(text, &config(10, 100_000));
        assert_eq!(paragraphs, vec![text.to_string()]);
    }
}
