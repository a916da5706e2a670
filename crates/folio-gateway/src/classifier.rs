//! On-topic query classification.
//!
//! Three checks, any of which admits a query: portfolio keyword overlap,
//! a short greeting, or a short "tell me about" style question. Anything
//! else is refused before retrieval runs.

use crate::server::Persona;

const BASE_KEYWORDS: &[&str] = &[
    "experience",
    "work",
    "job",
    "role",
    "position",
    "skill",
    "technology",
    "tech",
    "project",
    "built",
    "developed",
    "created",
    "education",
    "degree",
    "study",
    "contact",
    "email",
    "phone",
    "linkedin",
    "resume",
    "cv",
    "portfolio",
    "background",
    "qualification",
    "react",
    "typescript",
    "python",
    "java",
    "javascript",
    "rust",
    "frontend",
    "backend",
    "fullstack",
    "full stack",
    "engineer",
    "developer",
    "ai",
    "machine learning",
];

const GREETINGS: &[&str] = &["hi", "hello", "hey", "greetings", "good morning", "good afternoon"];

const ABOUT_PHRASES: &[&str] = &["who", "what", "tell me about", "describe", "explain"];

const MAX_GREETING_LEN: usize = 30;
const MAX_ABOUT_LEN: usize = 100;

#[derive(Debug, Clone)]
pub struct QueryClassifier {
    keywords: Vec<String>,
}

impl QueryClassifier {
    /// Build a classifier seeded with the base vocabulary plus the
    /// persona's name parts and configured site-specific keywords.
    #[must_use]
    pub fn new(persona: &Persona) -> Self {
        let mut keywords: Vec<String> = BASE_KEYWORDS.iter().map(|k| (*k).to_string()).collect();

        for part in persona.name.split_whitespace() {
            let part = part.to_lowercase();
            if part.len() >= 3 && !keywords.contains(&part) {
                keywords.push(part);
            }
        }
        for kw in &persona.keywords {
            let kw = kw.to_lowercase();
            if !kw.is_empty() && !keywords.contains(&kw) {
                keywords.push(kw);
            }
        }

        Self { keywords }
    }

    #[must_use]
    pub fn is_on_topic(&self, query: &str) -> bool {
        let trimmed = query.trim();
        let lower = trimmed.to_lowercase();

        if self.keywords.iter().any(|k| lower.contains(k.as_str())) {
            return true;
        }

        if trimmed.len() < MAX_GREETING_LEN
            && GREETINGS
                .iter()
                .any(|g| lower == *g || lower.starts_with(&format!("{g} ")))
        {
            return true;
        }

        trimmed.len() < MAX_ABOUT_LEN && ABOUT_PHRASES.iter().any(|p| lower.contains(p))
    }
}
