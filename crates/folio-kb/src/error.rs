use thiserror::Error;

#[derive(Debug, Error)]
pub enum KbError {
    #[error("failed to read knowledge base: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse knowledge base: {0}")]
    Json(#[from] serde_json::Error),
}
