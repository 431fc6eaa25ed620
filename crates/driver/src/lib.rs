//! # Ragnote Driver
//!
//! Prompt templating and LLM dispatch for retrieval-augmented generation.
//!
//! ## Architecture
//!
//! ```text
//! Template (system/user messages, {name} placeholders)
//!     │
//!     ├──> QueryRequest (raw prompt overrides template)
//!     │
//!     └──> Driver
//!          ├─> OllamaProvider  (local generate API)
//!          └─> OpenAiProvider  (chat completions, bearer token)
//!               │
//!               ├─> query         — one blocking completion
//!               └─> query_stream  — mpsc stream of chunks
//! ```
//!
//! Retrieval stays decoupled: the driver consumes chunk texts as plain
//! strings and knows nothing about the index that produced them.

mod config;
mod driver;
mod error;
mod ollama;
mod openai;
mod provider;
mod template;

pub use config::DriverConfig;
pub use driver::{Backend, Driver, QueryRequest};
pub use error::{DriverError, Result};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use provider::{GenerateRequest, LlmProvider, StreamChunk};
pub use template::{Message, Role, Template};
