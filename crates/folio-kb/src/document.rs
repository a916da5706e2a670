use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::KbError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocMetadata {
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub metadata: DocMetadata,
}

/// A document paired with its relevance score for a single query.
///
/// Transient: created during retrieval and discarded with the request.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub doc: Document,
    pub score: f32,
}

/// In-memory view of the knowledge base file.
///
/// The file is re-read on every request; nothing here outlives one
/// request/response cycle.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    documents: Vec<Document>,
}

/// Accepts both `{"documents": [...]}` and a bare top-level array.
#[derive(Deserialize)]
#[serde(untagged)]
enum KbFile {
    Wrapped { documents: Vec<Document> },
    Bare(Vec<Document>),
}

impl KnowledgeBase {
    /// Parse a knowledge base from raw JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match either accepted shape.
    pub fn from_json(raw: &str) -> Result<Self, KbError> {
        let file: KbFile = serde_json::from_str(raw)?;
        let documents = match file {
            KbFile::Wrapped { documents } | KbFile::Bare(documents) => documents,
        };
        Ok(Self { documents })
    }

    /// Read and parse the knowledge base file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, KbError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents whose `metadata.type` equals `doc_type`, in file order.
    pub fn of_type<'a>(&'a self, doc_type: &'a str) -> impl Iterator<Item = &'a Document> {
        self.documents
            .iter()
            .filter(move |d| d.metadata.doc_type == doc_type)
    }
}
