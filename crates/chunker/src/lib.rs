//! # Ragnote Chunker
//!
//! Turns heterogeneous text sources into retrievable paragraph chunks.
//!
//! ## Pipeline
//!
//! ```text
//! Source (raw text | local file | web page)
//!     │
//!     ├──> Extraction
//!     │    ├─> file: read as UTF-8 text
//!     │    └─> url: fetch, strip markup to visible text
//!     │
//!     ├──> Truncation (first `doc_max_length` chars)
//!     │
//!     └──> Paragraph split on line boundaries
//!          └─> keep lines longer than `min_paragraph_length`
//!               └─> Chunk[] (label, text)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use ragnote_chunker::{ChunkerConfig, Ingestor, Source};
//!
//! #[tokio::main]
//! async fn main() -> ragnote_chunker::Result<()> {
//!     let ingestor = Ingestor::new(ChunkerConfig::default())?;
//!     let source = Source::Text("a paragraph that is long enough to keep\nno".to_string());
//!     let chunks = ingestor.ingest(&source, "notes").await?;
//!     println!("kept {} chunks", chunks.len());
//!     Ok(())
//! }
//! ```

mod chunker;
mod config;
mod error;
mod html;
mod ingest;
mod types;

pub use chunker::split_paragraphs;
pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use html::extract_visible_text;
pub use ingest::Ingestor;
pub use types::{Chunk, Source, DEFAULT_LABEL};
