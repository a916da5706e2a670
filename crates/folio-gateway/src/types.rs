//! Request and response payloads for the chat endpoint.

use serde::{Deserialize, Serialize};

use folio_kb::ScoredDocument;

#[derive(Debug, Deserialize)]
pub(crate) struct ChatPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub config: RequestConfig,
}

/// Per-request knobs. Everything is optional; server defaults apply.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RequestConfig {
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub filters: Option<Filters>,
    #[serde(default)]
    pub llm: LlmOverrides,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub(crate) struct Filters {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Filters {
    pub fn is_active(&self) -> bool {
        self.doc_type.is_some() || self.company.is_some() || self.category.is_some()
    }

    /// Applied after retrieval: filters narrow the retrieved set rather
    /// than widening the search.
    pub fn matches(&self, doc: &folio_kb::Document) -> bool {
        if let Some(ref t) = self.doc_type
            && doc.metadata.doc_type != *t
        {
            return false;
        }
        if let Some(ref c) = self.company
            && doc.metadata.company.as_deref() != Some(c.as_str())
        {
            return false;
        }
        if let Some(ref c) = self.category
            && doc.metadata.category.as_deref() != Some(c.as_str())
        {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub(crate) struct LlmOverrides {
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatResponse {
    pub answer: String,
    pub citations: Vec<String>,
    pub confidence: f32,
    #[serde(rename = "_trace")]
    pub trace: Trace,
}

/// Diagnostic block attached to every chat response.
#[derive(Debug, Default, Serialize)]
pub(crate) struct Trace {
    pub request_id: String,
    pub query: String,
    pub timestamp: String,
    pub processing_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_as_off_topic: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub retrieved_docs: Vec<TraceDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters_applied: Option<Filters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_kb_docs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_after_filtering: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_available: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TraceDoc {
    pub doc_id: String,
    pub score: f32,
    pub title: String,
}

impl From<&ScoredDocument> for TraceDoc {
    fn from(sd: &ScoredDocument) -> Self {
        Self {
            doc_id: sd.doc.doc_id.clone(),
            score: sd.score,
            title: sd.doc.title.clone(),
        }
    }
}

/// Shape the model is instructed to reply with.
#[derive(Debug, Deserialize)]
pub(crate) struct LlmAnswer {
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<String>,
    #[serde(default = "default_llm_confidence")]
    pub confidence: f32,
}

fn default_llm_confidence() -> f32 {
    0.5
}

#[cfg(test)]
mod tests {
    use folio_kb::{DocMetadata, Document};

    use super::*;

    fn doc(doc_type: &str, company: Option<&str>, category: Option<&str>) -> Document {
        Document {
            doc_id: "d".into(),
            title: "t".into(),
            content: "c".into(),
            metadata: DocMetadata {
                doc_type: doc_type.into(),
                company: company.map(Into::into),
                category: category.map(Into::into),
            },
        }
    }

    #[test]
    fn payload_tolerates_missing_fields() {
        let p: ChatPayload = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(p.message.as_deref(), Some("hi"));
        assert!(p.config.top_k.is_none());
        assert!(p.config.filters.is_none());

        let p: ChatPayload = serde_json::from_str("{}").unwrap();
        assert!(p.message.is_none());
    }

    #[test]
    fn payload_parses_full_config() {
        let raw = r#"{
            "message": "projects?",
            "config": {
                "top_k": 5,
                "filters": {"type": "project", "company": "Acme"},
                "llm": {"temperature": 0.7, "max_tokens": 200}
            }
        }"#;
        let p: ChatPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(p.config.top_k, Some(5));
        let filters = p.config.filters.unwrap();
        assert_eq!(filters.doc_type.as_deref(), Some("project"));
        assert_eq!(filters.company.as_deref(), Some("Acme"));
        assert!(filters.category.is_none());
        assert_eq!(p.config.llm.max_tokens, Some(200));
    }

    #[test]
    fn filters_match_on_all_set_fields() {
        let f = Filters {
            doc_type: Some("experience".into()),
            company: Some("Acme".into()),
            category: None,
        };
        assert!(f.matches(&doc("experience", Some("Acme"), None)));
        assert!(!f.matches(&doc("experience", Some("Other"), None)));
        assert!(!f.matches(&doc("project", Some("Acme"), None)));
    }

    #[test]
    fn empty_filters_match_everything() {
        let f = Filters::default();
        assert!(!f.is_active());
        assert!(f.matches(&doc("anything", None, None)));
    }

    #[test]
    fn trace_skips_unset_fields() {
        let trace = Trace {
            request_id: "r1".into(),
            query: "q".into(),
            timestamp: "now".into(),
            processing_time_ms: 3,
            ..Trace::default()
        };
        let json = serde_json::to_string(&trace).unwrap();
        assert!(!json.contains("rejected_as_off_topic"));
        assert!(!json.contains("retrieved_docs"));
        assert!(!json.contains("filters_applied"));
    }

    #[test]
    fn llm_answer_defaults_confidence() {
        let a: LlmAnswer = serde_json::from_str(r#"{"answer":"hi"}"#).unwrap();
        assert!((a.confidence - 0.5).abs() < f32::EPSILON);
        assert!(a.citations.is_empty());
    }
}
