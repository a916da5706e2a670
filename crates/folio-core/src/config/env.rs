use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("FOLIO_BIND") {
            self.server.bind = v;
        }
        if let Ok(v) = std::env::var("FOLIO_PORT") {
            if let Ok(port) = v.parse::<u16>() {
                self.server.port = port;
            } else {
                tracing::warn!("ignoring invalid FOLIO_PORT value: {v}");
            }
        }
        if let Ok(v) = std::env::var("FOLIO_RATE_LIMIT")
            && let Ok(limit) = v.parse::<u32>()
        {
            self.server.rate_limit = limit;
        }
        if let Ok(v) = std::env::var("FOLIO_MAX_BODY_SIZE")
            && let Ok(size) = v.parse::<usize>()
        {
            self.server.max_body_size = size;
        }
        if let Ok(v) = std::env::var("FOLIO_KB_PATH") {
            self.kb.path = v;
        }
        if let Ok(v) = std::env::var("FOLIO_LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("FOLIO_LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("FOLIO_LLM_MAX_TOKENS")
            && let Ok(tokens) = v.parse::<u32>()
        {
            self.llm.max_tokens = tokens;
        }
        if let Ok(v) = std::env::var("FOLIO_LLM_TEMPERATURE")
            && let Ok(temp) = v.parse::<f32>()
        {
            self.llm.temperature = temp;
        }
        if let Ok(v) = std::env::var("FOLIO_PERSONA_NAME") {
            self.persona.name = v;
        }
        if let Ok(v) = std::env::var("FOLIO_TOP_K")
            && let Ok(k) = v.parse::<usize>()
        {
            self.retrieval.top_k = k;
        }
    }
}
