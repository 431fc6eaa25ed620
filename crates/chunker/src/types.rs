use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Label applied when the caller does not supply one
pub const DEFAULT_LABEL: &str = "undefined";

/// A unit of retrievable text with its source label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Caller-supplied grouping label
    pub label: String,

    /// The paragraph text
    pub text: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Length of the text in characters, not bytes
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// One ingestible input, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Raw text, split as-is
    Text(String),

    /// Path to a local UTF-8 text file
    File(PathBuf),

    /// Web page; fetched and reduced to visible text
    Url(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_is_chars_not_bytes() {
        let chunk = Chunk::new("notes", "héllo");
        assert_eq!(chunk.char_count(), 5);
        assert_eq!(chunk.text.len(), 6);
    }
}
