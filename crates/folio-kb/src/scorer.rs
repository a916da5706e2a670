//! Keyword relevance scoring: exact phrase and word-overlap heuristics.

use crate::document::{Document, KnowledgeBase, ScoredDocument};

const PHRASE_IN_CONTENT: f32 = 10.0;
const PHRASE_IN_TITLE: f32 = 5.0;
const WORD_IN_CONTENT: f32 = 1.0;
const WORD_IN_TITLE: f32 = 0.5;

/// Minimum word length counted for overlap, filters "a", "is", "to" noise.
const MIN_WORD_LEN: usize = 3;

/// Score one document against a lowercased query.
///
/// Substring containment only, no stemming or tokenization beyond
/// whitespace splitting. Always non-negative.
#[must_use]
pub fn relevance_score(doc: &Document, query: &str) -> f32 {
    let content = doc.content.to_lowercase();
    let title = doc.title.to_lowercase();

    let mut score = 0.0;

    if content.contains(query) {
        score += PHRASE_IN_CONTENT;
    }
    if title.contains(query) {
        score += PHRASE_IN_TITLE;
    }

    for word in query.split_whitespace().filter(|w| w.len() >= MIN_WORD_LEN) {
        if content.contains(word) {
            score += WORD_IN_CONTENT;
        }
        if title.contains(word) {
            score += WORD_IN_TITLE;
        }
    }

    score
}

/// Score every document against `query` and return the top `top_k`,
/// sorted descending by score.
///
/// Zero-scored documents are kept so the caller can detect the
/// "nothing matched" case and switch to fallback selection.
#[must_use]
pub fn rank(kb: &KnowledgeBase, query: &str, top_k: usize) -> Vec<ScoredDocument> {
    let query = query.to_lowercase();

    let mut scored: Vec<ScoredDocument> = kb
        .documents()
        .iter()
        .map(|doc| ScoredDocument {
            doc: doc.clone(),
            score: relevance_score(doc, &query),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocMetadata;

    fn doc(doc_id: &str, title: &str, content: &str) -> Document {
        Document {
            doc_id: doc_id.into(),
            title: title.into(),
            content: content.into(),
            metadata: DocMetadata::default(),
        }
    }

    fn kb(docs: Vec<Document>) -> KnowledgeBase {
        let raw = serde_json::to_string(&docs).unwrap();
        KnowledgeBase::from_json(&raw).unwrap()
    }

    #[test]
    fn exact_phrase_in_content_scores_ten() {
        let d = doc("d", "title", "worked on rust tooling at acme");
        let score = relevance_score(&d, "rust tooling");
        // phrase (+10) plus both words in content (+1 each)
        assert!((score - 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn exact_phrase_in_title_scores_five() {
        let d = doc("d", "rust tooling", "something unrelated entirely");
        let score = relevance_score(&d, "rust tooling");
        assert!((score - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn short_words_ignored_for_overlap() {
        let d = doc("d", "a to of", "a to of");
        assert!(relevance_score(&d, "to of") > 0.0); // phrase still matches
        let d2 = doc("d2", "xyz", "qrs");
        assert!((relevance_score(&d2, "to of") - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn score_monotonic_in_word_overlap() {
        let one = doc("one", "t", "rust only here");
        let two = doc("two", "t", "rust and python here");
        let query = "rust python";
        assert!(relevance_score(&two, query) > relevance_score(&one, query));
    }

    #[test]
    fn scores_never_negative() {
        let d = doc("d", "unrelated", "nothing in common");
        assert!(relevance_score(&d, "quantum chromodynamics") >= 0.0);
    }

    #[test]
    fn rank_sorts_descending_and_truncates() {
        let base = kb(vec![
            doc("low", "t", "nothing relevant"),
            doc("high", "rust engineer", "rust engineer building rust services"),
            doc("mid", "t", "some rust experience"),
        ]);
        let ranked = rank(&base, "rust engineer", 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].doc.doc_id, "high");
        assert_eq!(ranked[1].doc.doc_id, "mid");
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn rank_is_case_insensitive() {
        let base = kb(vec![doc("d", "Rust Engineer", "Rust services")]);
        let ranked = rank(&base, "RUST", 1);
        assert!(ranked[0].score > 0.0);
    }

    #[test]
    fn rank_keeps_zero_scores() {
        let base = kb(vec![doc("d", "t", "c")]);
        let ranked = rank(&base, "unrelated query words", 3);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].score - 0.0).abs() < f32::EPSILON);
    }
}
