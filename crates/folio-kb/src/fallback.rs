//! Topic-based document selection for queries the scorer could not match.

use crate::document::{Document, KnowledgeBase};

const CONTACT_WORDS: &[&str] = &["contact", "email", "reach", "phone", "linkedin", "get in touch"];
const PERSONAL_WORDS: &[&str] = &["age", "old", "young", "where", "live", "from"];
const ABILITY_WORDS: &[&str] = &["can", "able", "know", "skill", "technology", "programming"];
const WORK_WORDS: &[&str] = &["work", "job", "career", "employ", "company"];
const PROJECT_WORDS: &[&str] = &["project", "built", "made", "created", "portfolio"];

fn mentions_any(query: &str, words: &[&str]) -> bool {
    words.iter().any(|w| query.contains(w))
}

/// Pick documents for a query that matched nothing during scoring.
///
/// Buckets are checked in order; the first matching topic wins. A query
/// with no topic words gets one document each of experience, project,
/// and skills. An empty result falls back to the first three documents.
#[must_use]
pub fn fallback_documents(kb: &KnowledgeBase, query: &str, top_k: usize) -> Vec<Document> {
    let query = query.to_lowercase();

    let mut docs: Vec<Document> = if mentions_any(&query, CONTACT_WORDS) {
        kb.of_type("contact").cloned().collect()
    } else if mentions_any(&query, PERSONAL_WORDS) {
        // Personal questions get work history plus contact info
        let mut d: Vec<Document> = kb.of_type("experience").take(2).cloned().collect();
        d.extend(kb.of_type("contact").cloned());
        d
    } else if mentions_any(&query, ABILITY_WORDS) {
        kb.documents()
            .iter()
            .filter(|d| {
                d.metadata.doc_type == "skills" || d.metadata.doc_type == "experience"
            })
            .cloned()
            .collect()
    } else if mentions_any(&query, WORK_WORDS) {
        kb.of_type("experience").cloned().collect()
    } else if mentions_any(&query, PROJECT_WORDS) {
        kb.of_type("project").cloned().collect()
    } else {
        let mut d: Vec<Document> = kb.of_type("experience").take(1).cloned().collect();
        d.extend(kb.of_type("project").take(1).cloned());
        d.extend(kb.of_type("skills").take(1).cloned());
        d
    };

    if docs.is_empty() {
        docs = kb.documents().iter().take(3).cloned().collect();
    }

    docs.truncate(top_k);
    docs
}
