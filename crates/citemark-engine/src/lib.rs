pub mod commands;
pub mod editing;
pub mod markup;
pub mod sorting;

// Re-export key types for easier usage
pub use commands::EditError;
pub use editing::document::{DocKind, Document};
pub use editing::span::Span;
pub use markup::citation::{CitationMatch, Field, KeyOutcome};
