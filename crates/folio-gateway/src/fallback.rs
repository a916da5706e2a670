//! Templated answers for when no LLM response is available.
//!
//! Used both when the provider call fails and when no API key is
//! configured at all. Answers are assembled from the retrieved documents
//! so they stay grounded in the knowledge base.

use folio_kb::Document;

use crate::server::Persona;

/// Confidence reported for templated answers. Higher than a raw-text
/// wrap because the content comes straight from the knowledge base.
pub(crate) const FALLBACK_CONFIDENCE: f32 = 0.85;

/// Confidence reported when the model replied but not in the expected
/// JSON shape and we pass its raw text through.
pub(crate) const PARSE_FALLBACK_CONFIDENCE: f32 = 0.5;

const SNIPPET_LEN: usize = 120;

const INTRO_PHRASES: &[&str] = &[
    "who is this",
    "whose resume",
    "who are you",
    "tell me about this person",
    "about you",
    "about yourself",
    "introduce",
    "summary of",
    "overview of",
];
const EXPERIENCE_WORDS: &[&str] = &["experience", "work", "job", "career", "role"];
const PROJECT_WORDS: &[&str] = &["project", "built", "made", "created"];
const SKILL_WORDS: &[&str] = &["skill", "technology", "tech", "know", "stack"];
const CONTACT_WORDS: &[&str] = &["contact", "email", "reach", "hire", "phone"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TopicHint {
    Introduction,
    Experience,
    Projects,
    Skills,
    Contact,
    General,
}

pub(crate) struct TemplatedAnswer {
    pub answer: String,
    pub citations: Vec<String>,
}

pub(crate) fn refusal_answer(persona: &Persona) -> String {
    format!(
        "I can only answer questions about {name}'s professional background, \
         skills, projects, and experience. Try asking about their work history \
         or what they've built!",
        name = persona.name
    )
}

pub(crate) fn no_context_answer(persona: &Persona) -> String {
    format!(
        "I don't have information about that in {name}'s portfolio. \
         Try asking about their experience, projects, or skills.",
        name = persona.name
    )
}

/// Build a topic-appropriate answer directly from the retrieved documents.
pub(crate) fn templated_answer(persona: &Persona, query: &str, docs: &[Document]) -> TemplatedAnswer {
    let topic = detect_topic(query, persona);

    let topical: Vec<&Document> = match topic {
        TopicHint::Experience => of_type(docs, "experience"),
        TopicHint::Projects => of_type(docs, "project"),
        TopicHint::Skills => of_type(docs, "skills"),
        TopicHint::Contact => of_type(docs, "contact"),
        TopicHint::Introduction | TopicHint::General => Vec::new(),
    };
    let picked: Vec<&Document> = if topical.is_empty() {
        docs.iter().take(2).collect()
    } else {
        topical
    };
    let citations: Vec<String> = picked.iter().map(|d| d.doc_id.clone()).collect();
    let snippet = picked.first().map(|d| snippet(&d.content)).unwrap_or_default();
    let name = &persona.name;

    let answer = match topic {
        TopicHint::Introduction => format!(
            "This is {name}'s portfolio assistant! {snippet} Want to know more \
             about their experience or projects?"
        ),
        TopicHint::Experience => {
            format!("{name} has professional experience across several roles. {snippet}")
        }
        TopicHint::Projects => format!("{name} has built some interesting projects. {snippet}"),
        TopicHint::Skills => format!("{name} works with a broad technical stack. {snippet}"),
        TopicHint::Contact => contact_answer(persona, &snippet),
        TopicHint::General => format!(
            "I'm here to tell you about {name}'s professional background. {snippet} \
             What would you like to know more about?"
        ),
    };

    TemplatedAnswer { answer, citations }
}

fn contact_answer(persona: &Persona, snippet: &str) -> String {
    let name = &persona.name;
    match (&persona.email, &persona.website) {
        (Some(email), Some(site)) => {
            format!("You can reach {name} at {email} or through {site}.")
        }
        (Some(email), None) => format!("You can reach {name} at {email}."),
        (None, Some(site)) => format!("You can reach {name} through {site}."),
        (None, None) => format!("Here is {name}'s contact information: {snippet}"),
    }
}

fn detect_topic(query: &str, persona: &Persona) -> TopicHint {
    let lower = query.to_lowercase();
    let first_name = persona
        .name
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    let is_intro = INTRO_PHRASES.iter().any(|p| lower.contains(p))
        || (!first_name.is_empty()
            && (lower.contains(&format!("who is {first_name}"))
                || lower.contains(&format!("about {first_name}"))));
    if is_intro {
        return TopicHint::Introduction;
    }
    if CONTACT_WORDS.iter().any(|w| lower.contains(w)) {
        return TopicHint::Contact;
    }
    if PROJECT_WORDS.iter().any(|w| lower.contains(w)) {
        return TopicHint::Projects;
    }
    if SKILL_WORDS.iter().any(|w| lower.contains(w)) {
        return TopicHint::Skills;
    }
    if EXPERIENCE_WORDS.iter().any(|w| lower.contains(w)) {
        return TopicHint::Experience;
    }
    TopicHint::General
}

fn of_type<'a>(docs: &'a [Document], doc_type: &str) -> Vec<&'a Document> {
    docs.iter().filter(|d| d.metadata.doc_type == doc_type).collect()
}

/// First `SNIPPET_LEN` characters of `content`, cut on a char boundary.
fn snippet(content: &str) -> String {
    if content.chars().count() <= SNIPPET_LEN {
        content.to_string()
    } else {
        let cut: String = content.chars().take(SNIPPET_LEN).collect();
        format!("{}...", cut.trim_end())
    }
}
