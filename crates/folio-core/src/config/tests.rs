use std::path::Path;

use serial_test::serial;

use super::Config;

#[test]
fn missing_file_uses_defaults() {
    let config = Config::load(Path::new("/does/not/exist.toml")).unwrap();
    assert_eq!(config.server.bind, "127.0.0.1");
    assert_eq!(config.server.port, 8787);
    assert_eq!(config.kb.path, "data/kb.json");
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.retrieval.top_k, 3);
    assert_eq!(config.persona.name, "the site owner");
}

#[test]
fn parses_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.toml");
    std::fs::write(
        &path,
        r#"
[server]
port = 9000

[llm]
model = "gpt-4o"
temperature = 0.3

[persona]
name = "Jordan Avery"
email = "jordan@example.com"
keywords = ["acme", "widgetworks"]

[retrieval]
top_k = 5
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.llm.model, "gpt-4o");
    assert!((config.llm.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(config.persona.name, "Jordan Avery");
    assert_eq!(config.persona.email.as_deref(), Some("jordan@example.com"));
    assert_eq!(config.persona.keywords.len(), 2);
    assert_eq!(config.retrieval.top_k, 5);
    // untouched sections keep defaults
    assert_eq!(config.server.bind, "127.0.0.1");
    assert_eq!(config.llm.max_tokens, 500);
}

#[test]
fn unparseable_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "this is not toml [[[").unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
#[serial]
fn env_overrides_apply() {
    unsafe {
        std::env::set_var("FOLIO_PORT", "9999");
        std::env::set_var("FOLIO_LLM_MODEL", "gpt-4.1-mini");
        std::env::set_var("FOLIO_TOP_K", "7");
    }
    let config = Config::load(Path::new("/does/not/exist.toml")).unwrap();
    unsafe {
        std::env::remove_var("FOLIO_PORT");
        std::env::remove_var("FOLIO_LLM_MODEL");
        std::env::remove_var("FOLIO_TOP_K");
    }
    assert_eq!(config.server.port, 9999);
    assert_eq!(config.llm.model, "gpt-4.1-mini");
    assert_eq!(config.retrieval.top_k, 7);
}

#[test]
#[serial]
fn invalid_env_port_ignored() {
    unsafe { std::env::set_var("FOLIO_PORT", "not_a_port") };
    let config = Config::load(Path::new("/does/not/exist.toml")).unwrap();
    unsafe { std::env::remove_var("FOLIO_PORT") };
    assert_eq!(config.server.port, 8787);
}

#[test]
#[serial]
fn resolve_secrets_prefers_folio_var() {
    unsafe {
        std::env::set_var("FOLIO_OPENAI_API_KEY", "sk-folio");
        std::env::set_var("OPENAI_API_KEY", "sk-generic");
    }
    let mut config = Config::load(Path::new("/does/not/exist.toml")).unwrap();
    config.resolve_secrets();
    unsafe {
        std::env::remove_var("FOLIO_OPENAI_API_KEY");
        std::env::remove_var("OPENAI_API_KEY");
    }
    assert_eq!(
        config.secrets.openai_api_key.as_ref().map(crate::Secret::expose),
        Some("sk-folio")
    );
}

#[test]
#[serial]
fn resolve_secrets_falls_back_to_generic_var() {
    unsafe {
        std::env::remove_var("FOLIO_OPENAI_API_KEY");
        std::env::set_var("OPENAI_API_KEY", "sk-generic");
    }
    let mut config = Config::load(Path::new("/does/not/exist.toml")).unwrap();
    config.resolve_secrets();
    unsafe { std::env::remove_var("OPENAI_API_KEY") };
    assert_eq!(
        config.secrets.openai_api_key.as_ref().map(crate::Secret::expose),
        Some("sk-generic")
    );
}

#[test]
fn validate_accepts_defaults() {
    let config = Config::load(Path::new("/does/not/exist.toml")).unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn validate_rejects_zero_top_k() {
    let mut config = Config::default();
    config.retrieval.top_k = 0;
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_out_of_range_temperature() {
    let mut config = Config::default();
    config.llm.temperature = 3.5;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("temperature"));
}

#[test]
fn validate_rejects_zero_max_tokens() {
    let mut config = Config::default();
    config.llm.max_tokens = 0;
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_empty_kb_path() {
    let mut config = Config::default();
    config.kb.path = String::new();
    assert!(config.validate().is_err());
}
