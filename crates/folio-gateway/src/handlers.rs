use std::path::Path;
use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use folio_kb::{Document, KnowledgeBase, ScoredDocument, fallback::fallback_documents, scorer};
use folio_llm::provider::{ChatOptions, LlmProvider, Message, Role};

use crate::fallback::{self, FALLBACK_CONFIDENCE, PARSE_FALLBACK_CONFIDENCE};
use crate::prompt;
use crate::server::AppState;
use crate::types::{ChatPayload, ChatResponse, LlmAnswer, Trace, TraceDoc};

/// Upper bound on per-request `top_k`, keeps prompt size sane.
const MAX_TOP_K: usize = 10;

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: &'static str,
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
}

fn error_response(status: StatusCode, error: &'static str) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

pub(crate) async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let timestamp = chrono::Utc::now().to_rfc3339();

    let payload = match payload {
        Ok(Json(p)) => p,
        // body over the RequestBodyLimitLayer cap surfaces here as 413
        Err(rej) if rej.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return error_response(StatusCode::PAYLOAD_TOO_LARGE, "request body too large");
        }
        Err(_) => {
            return error_response(StatusCode::BAD_REQUEST, "request body must be valid JSON");
        }
    };
    let Some(message) = payload.message.filter(|m| !m.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "message is required");
    };

    tracing::debug!(%request_id, query = %message, "chat request");

    // Step 1: refuse off-topic queries before touching the KB or the LLM.
    if !state.classifier.is_on_topic(&message) {
        tracing::info!(%request_id, "query rejected as off-topic");
        let trace = Trace {
            request_id,
            query: message,
            timestamp,
            processing_time_ms: elapsed_ms(started),
            rejected_as_off_topic: Some(true),
            ..Trace::default()
        };
        return Json(ChatResponse {
            answer: fallback::refusal_answer(&state.persona),
            citations: Vec::new(),
            confidence: 1.0,
            trace,
        })
        .into_response();
    }

    // The KB is re-read per request so edits to the file show up live.
    let kb = match load_kb(&state.kb_path).await {
        Ok(kb) => kb,
        Err(e) => {
            tracing::error!(%request_id, error = %e, path = %state.kb_path.display(), "knowledge base unavailable");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "knowledge base unavailable",
            );
        }
    };

    // Step 2: retrieval. Filters narrow the ranked set; they do not
    // widen the search.
    // zero means "use the server default", anything else is capped
    let top_k = match payload.config.top_k {
        Some(k) if k > 0 => k.min(MAX_TOP_K),
        _ => state.defaults.top_k,
    };
    let ranked = scorer::rank(&kb, &message, top_k);
    let total_kb_docs = kb.len();

    let filters = payload.config.filters.unwrap_or_default();
    let mut retrieved: Vec<ScoredDocument> = if filters.is_active() {
        ranked
            .into_iter()
            .filter(|sd| filters.matches(&sd.doc))
            .collect()
    } else {
        ranked
    };
    if retrieved.is_empty() || retrieved.iter().all(|sd| sd.score <= 0.0) {
        retrieved = fallback_documents(&kb, &message, top_k)
            .into_iter()
            .map(|doc| ScoredDocument { doc, score: 0.0 })
            .collect();
    }
    // final count, after any fallback selection
    let docs_after_filtering = retrieved.len();

    let trace_docs: Vec<TraceDoc> = retrieved.iter().map(TraceDoc::from).collect();
    let filters_applied = filters.is_active().then(|| filters.clone());

    // Nothing to ground an answer in, usually an empty KB file.
    if retrieved.is_empty() {
        let trace = Trace {
            request_id,
            query: message,
            timestamp,
            processing_time_ms: elapsed_ms(started),
            filters_applied,
            total_kb_docs: Some(total_kb_docs),
            docs_after_filtering: Some(docs_after_filtering),
            ..Trace::default()
        };
        return Json(ChatResponse {
            answer: fallback::no_context_answer(&state.persona),
            citations: Vec::new(),
            confidence: 0.0,
            trace,
        })
        .into_response();
    }

    // Steps 3 and 4: generation, with a templated answer when the
    // provider is unreachable.
    let docs: Vec<Document> = retrieved.iter().map(|sd| sd.doc.clone()).collect();
    let doc_ids: Vec<String> = docs.iter().map(|d| d.doc_id.clone()).collect();
    let context = prompt::build_context(&docs);
    let options = ChatOptions {
        temperature: payload
            .config
            .llm
            .temperature
            .unwrap_or(state.defaults.temperature),
        max_tokens: payload
            .config
            .llm
            .max_tokens
            .unwrap_or(state.defaults.max_tokens),
    };
    let messages = [
        Message::new(Role::System, prompt::system_prompt(&state.persona)),
        Message::new(Role::User, prompt::user_prompt(&context, &message)),
    ];

    let (answer, citations, confidence, llm_available, used_fallback) =
        match state.provider.chat(&messages, &options).await {
            Ok(raw) => match serde_json::from_str::<LlmAnswer>(raw.trim()) {
                Ok(parsed) if !parsed.answer.trim().is_empty() => (
                    parsed.answer,
                    parsed.citations,
                    parsed.confidence.clamp(0.0, 1.0),
                    true,
                    false,
                ),
                // Model ignored the JSON contract: pass its text through
                // and cite everything it saw.
                _ => (raw, doc_ids, PARSE_FALLBACK_CONFIDENCE, true, false),
            },
            Err(e) => {
                tracing::warn!(%request_id, error = %e, "provider call failed, serving templated answer");
                let t = fallback::templated_answer(&state.persona, &message, &docs);
                (t.answer, t.citations, FALLBACK_CONFIDENCE, false, true)
            }
        };

    let trace = Trace {
        request_id,
        query: message,
        timestamp,
        processing_time_ms: elapsed_ms(started),
        rejected_as_off_topic: None,
        retrieved_docs: trace_docs,
        filters_applied,
        total_kb_docs: Some(total_kb_docs),
        docs_after_filtering: Some(docs_after_filtering),
        used_fallback: Some(used_fallback),
        llm_available: Some(llm_available),
    };

    Json(ChatResponse {
        answer,
        citations,
        confidence,
        trace,
    })
    .into_response()
}

async fn load_kb(path: &Path) -> Result<KnowledgeBase, folio_kb::KbError> {
    let raw = tokio::fs::read_to_string(path).await?;
    KnowledgeBase::from_json(&raw)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok",
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }

    #[test]
    fn error_response_shape() {
        let json = serde_json::to_string(&ErrorResponse {
            error: "message is required",
        })
        .unwrap();
        assert_eq!(json, r#"{"error":"message is required"}"#);
    }
}
