//! Static resume knowledge base: JSON-backed documents, keyword relevance
//! scoring, and topic-based fallback selection.

pub mod document;
pub mod error;
pub mod fallback;
pub mod scorer;

pub use document::{DocMetadata, Document, KnowledgeBase, ScoredDocument};
pub use error::KbError;
