/// Wrapper for sensitive string values that must never appear in logs.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    #[must_use]
    pub fn new(value: String) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_shows_value() {
        let s = Secret::new("sk-very-secret".into());
        let debug = format!("{s:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn expose_returns_value() {
        let s = Secret::new("value".into());
        assert_eq!(s.expose(), "value");
    }
}
