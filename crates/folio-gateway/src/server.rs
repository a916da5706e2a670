use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;

use tokio::sync::watch;

use folio_llm::any::AnyProvider;

use crate::classifier::QueryClassifier;
use crate::error::GatewayError;
use crate::router::build_router;

/// The person the assistant answers questions about.
#[derive(Debug, Clone)]
pub struct Persona {
    pub name: String,
    pub email: Option<String>,
    pub website: Option<String>,
    /// Extra on-topic terms, typically employer and project names.
    pub keywords: Vec<String>,
}

/// Server-side defaults for per-request knobs.
#[derive(Debug, Clone, Copy)]
pub struct ChatDefaults {
    pub top_k: usize,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            top_k: 3,
            temperature: 0.1,
            max_tokens: 500,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub(crate) provider: AnyProvider,
    pub(crate) kb_path: PathBuf,
    pub(crate) persona: Persona,
    pub(crate) defaults: ChatDefaults,
    pub(crate) classifier: QueryClassifier,
    pub(crate) started_at: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(
        provider: AnyProvider,
        kb_path: impl Into<PathBuf>,
        persona: Persona,
        defaults: ChatDefaults,
    ) -> Self {
        let classifier = QueryClassifier::new(&persona);
        Self {
            provider,
            kb_path: kb_path.into(),
            persona,
            defaults,
            classifier,
            started_at: Instant::now(),
        }
    }
}

pub struct GatewayServer {
    addr: SocketAddr,
    rate_limit: u32,
    max_body_size: usize,
    state: AppState,
    shutdown_rx: watch::Receiver<bool>,
}

impl GatewayServer {
    #[must_use]
    pub fn new(bind: &str, port: u16, state: AppState, shutdown_rx: watch::Receiver<bool>) -> Self {
        let addr: SocketAddr = format!("{bind}:{port}").parse().unwrap_or_else(|e| {
            tracing::warn!("invalid bind '{bind}': {e}, falling back to 127.0.0.1:{port}");
            SocketAddr::from(([127, 0, 0, 1], port))
        });

        Self {
            addr,
            rate_limit: 120,
            max_body_size: 65_536,
            state,
            shutdown_rx,
        }
    }

    #[must_use]
    pub fn with_rate_limit(mut self, limit: u32) -> Self {
        self.rate_limit = limit;
        self
    }

    #[must_use]
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Start the HTTP server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or encounters a fatal I/O error.
    pub async fn serve(self) -> Result<(), GatewayError> {
        let router = build_router(self.state, self.rate_limit, self.max_body_size);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| GatewayError::Bind(self.addr.to_string(), e))?;
        tracing::info!("gateway listening on {}", self.addr);

        let mut shutdown_rx = self.shutdown_rx;
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            while !*shutdown_rx.borrow_and_update() {
                if shutdown_rx.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
            tracing::info!("gateway shutting down");
        })
        .await
        .map_err(|e| GatewayError::Server(format!("{e}")))?;

        Ok(())
    }
}
