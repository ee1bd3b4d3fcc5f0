//! Prompt Synthesizer
//!
//! Assembles the full text-generation prompt for one chat turn from the persona,
//! the user's message, recent history and memory context. Missing persona sections
//! simply drop their block; the result always ends with the user message and a
//! closing in-character instruction.

pub mod blocks;
pub mod templates;

pub use templates::{classify_presentation, PresentationTemplate, TemplateBundle};

use crate::memory::{MemoryContext, Turn};
use crate::persona::Persona;

const CLOSING_INSTRUCTION: &str =
    "Now reply to the user in character, as yourself, following every rule above.";

pub fn synthesize(persona: &Persona, user_message: &str, history: &[Turn], memory: &MemoryContext) -> String {
    let template = classify_presentation(&persona.trait_summary());
    let complained = blocks::verbosity_complained(user_message, history);

    let sections = [
        blocks::identity_header(persona),
        blocks::narrative_excerpt(persona.narrative.as_ref()),
        blocks::purpose_emphasis(&persona.identity.purpose),
        blocks::detailed_traits(persona.traits.as_ref()),
        blocks::humor_style(persona),
        blocks::template_instructions(template.bundle(), complained),
        blocks::memory_excerpts(memory),
        blocks::recent_history(history, persona.name()),
        blocks::situational_analysis(user_message),
        blocks::FORMAT_CONSTRAINTS.to_string(),
        format!("User message: {user_message}"),
        CLOSING_INSTRUCTION.to_string(),
    ];

    let prompt = sections
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    tracing::debug!(
        persona = %persona.name(),
        template = template.bundle().label,
        chars = prompt.chars().count(),
        "prompt synthesized"
    );
    platform::record_histogram("prompt_chars", prompt.chars().count() as f64);
    prompt
}
