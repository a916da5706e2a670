//! HTTP gateway for the portfolio chat API: query classification,
//! keyword retrieval over the knowledge base, LLM answer generation,
//! and templated fallbacks, exposed as `POST /chat` plus `GET /health`.

mod classifier;
mod error;
mod fallback;
mod handlers;
mod prompt;
mod router;
mod server;
mod types;

pub use classifier::QueryClassifier;
pub use error::GatewayError;
pub use router::build_router;
pub use server::{AppState, ChatDefaults, GatewayServer, Persona};
