use std::path::PathBuf;

use anyhow::Context;
use tokio::sync::watch;

use folio_core::Config;
use folio_gateway::{AppState, ChatDefaults, GatewayServer, Persona};
use folio_llm::any::AnyProvider;
use folio_llm::openai::OpenAiProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let config_path = resolve_config_path();
    let mut config = Config::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    config.validate()?;
    config.resolve_secrets();

    let provider = create_provider(&config);

    let persona = Persona {
        name: config.persona.name.clone(),
        email: config.persona.email.clone(),
        website: config.persona.website.clone(),
        keywords: config.persona.keywords.clone(),
    };
    let defaults = ChatDefaults {
        top_k: config.retrieval.top_k,
        temperature: config.llm.temperature,
        max_tokens: config.llm.max_tokens,
    };
    let state = AppState::new(provider, config.kb.path.clone(), persona, defaults);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e:#}");
            return;
        }
        tracing::info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    tracing::info!(
        "folio v{} serving {} on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.kb.path,
        config.server.bind,
        config.server.port
    );

    GatewayServer::new(&config.server.bind, config.server.port, state, shutdown_rx)
        .with_rate_limit(config.server.rate_limit)
        .with_max_body_size(config.server.max_body_size)
        .serve()
        .await?;

    Ok(())
}

fn create_provider(config: &Config) -> AnyProvider {
    let api_key = match config.secrets.openai_api_key {
        Some(ref key) => key.expose().to_owned(),
        None => {
            // Without a key every request takes the templated-answer path.
            tracing::warn!(
                "no OPENAI_API_KEY configured, answers will be templated from the knowledge base"
            );
            String::new()
        }
    };
    AnyProvider::OpenAi(OpenAiProvider::new(
        api_key,
        config.llm.base_url.clone(),
        config.llm.model.clone(),
    ))
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Priority: CLI --config > `FOLIO_CONFIG` env > config/default.toml
fn resolve_config_path() -> PathBuf {
    let args: Vec<String> = std::env::args().collect();
    if let Some(path) = args.windows(2).find(|w| w[0] == "--config").map(|w| &w[1]) {
        return PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("FOLIO_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}
