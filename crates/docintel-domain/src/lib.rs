//! docintel Domain Layer
//!
//! Core data model shared by every docintel crate. Like the rest of the
//! domain layer it carries no infrastructure: no I/O, no HTTP, no parsing
//! libraries. Capability traits for the outside world (language models)
//! live here and are implemented elsewhere.
//!
//! ## Key Concepts
//!
//! - **Document**: opaque bytes plus a declared format (`pdf` or `docx`)
//! - **Chunk**: an overlapping, position-tagged slice of a document's text
//! - **ClauseRecord**: a `{title, text}` unit produced by clause review
//! - **ChatTurn / ChatSession**: caller-owned conversation history

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;
pub mod chunk;
pub mod clause;
pub mod document;
pub mod traits;

// Re-exports for convenience
pub use chat::{ChatSession, ChatTurn, Role, SessionId};
pub use chunk::Chunk;
pub use clause::{ClauseRecord, PARSING_ERROR_TITLE};
pub use document::{Document, DocumentFormat, UnsupportedFormat};
pub use traits::LlmProvider;
