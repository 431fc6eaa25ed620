use scraper::{Html, Node};

/// Extract the visible text of an HTML document.
///
/// Text nodes under `<script>` and `<style>` elements are excluded, as are
/// comments and the markup itself. Whitespace inside text nodes is kept so
/// the line structure of the source survives for paragraph splitting.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    for node in document.tree.nodes() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| matches!(element.name(), "script" | "style"))
        });

        if !hidden {
            out.push_str(&text.text);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_stripped() {
        let html = "<html><body><p>first paragraph</p><p>second paragraph</p></body></html>";
        let text = extract_visible_text(html);

        assert!(text.contains("first paragraph"));
        assert!(text.contains("second paragraph"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_scripts_and_styles_are_hidden() {
        let html = concat!(
            "<html><head><style>body { color: red; }</style>",
            "<script>console.log(\"noise\");</script></head>",
            "<body>visible body text</body></html>",
        );
        let text = extract_visible_text(html);

        assert!(text.contains("visible body text"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("console.log"));
    }

    #[test]
    fn test_newlines_in_text_survive() {
        let html = "<body><pre>line one long enough\nline two long enough</pre></body>";
        let text = extract_visible_text(html);

        assert!(text.contains("line one long enough\nline two long enough"));
    }
}
