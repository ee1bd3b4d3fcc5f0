//! Persona generation pipeline
//!
//! oracle analysis -> archetype -> physical adapter -> purpose adapter -> jitter
//! -> humor matrix -> narrative -> descriptive text.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use shared_types::{now_rfc3339, BasicInfo, GenerationConfig, ObjectAnalysis, RECORD_VERSION};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::adapters::{apply_jitter, PhysicalTraitAdapter, PurposeAdapter};
use crate::archetype::{classify, Archetype, CoarseHints};
use crate::fallback::default_analysis;
use crate::humor::HumorMatrix;
use crate::narrative::NarrativeGenerator;
use crate::oracle::{parse_analysis, ImageAnalyzer, ImageInput};
use crate::persona::Persona;
use crate::traits::{communication_style, contradiction_descriptions, flaw_descriptions, TraitVector};

const NAME_ADJECTIVES: &[&str] = &[
    "Sleepy", "Brave", "Grumpy", "Sunny", "Dusty", "Lucky", "Fuzzy", "Quiet", "Bouncy", "Clever",
];

/// What the user tells us about the object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    pub name: String,
    pub description: String,
    pub purpose: String,
    pub location: String,
    pub time_together: String,
}

/// Capitalized object type behind a random adjective, e.g. "Sleepy Mug".
fn generated_name<R: Rng + ?Sized>(object_type: &str, rng: &mut R) -> String {
    let adjective = NAME_ADJECTIVES.choose(rng).copied().unwrap_or("Little");
    let object = object_type.trim();
    let mut chars = object.chars();
    let noun = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => "Thing".to_string(),
    };
    format!("{adjective} {noun}")
}

pub struct PersonaGenerator {
    config: GenerationConfig,
    analyzer: Arc<dyn ImageAnalyzer>,
}

impl PersonaGenerator {
    pub fn new(config: GenerationConfig, analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        Self { config, analyzer }
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Analyze the image, then build a persona. Oracle failures degrade to the default analysis.
    pub async fn generate(&self, image: &ImageInput, context: &UserContext) -> Persona {
        let span = platform::session_span(Uuid::new_v4(), "generate_persona", "");
        async {
            let analysis = self.analyze(image).await;
            let mut rng = self.rng();
            self.generate_from_analysis(&analysis, context, &mut rng)
        }
        .instrument(span)
        .await
    }

    async fn analyze(&self, image: &ImageInput) -> ObjectAnalysis {
        let raw = match self.analyzer.analyze(image).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "image analysis failed, using default analysis");
                platform::record_counter("persona_oracle_fallback_total", 1);
                return default_analysis();
            }
        };

        match parse_analysis(&raw) {
            Ok(parsed) => {
                if !parsed.defaulted.is_empty() {
                    tracing::warn!(fields = ?parsed.defaulted, "analysis fields defaulted");
                    platform::record_counter("persona_malformed_analysis_total", 1);
                }
                parsed.analysis
            }
            Err(err) => {
                tracing::warn!(error = %err, "unparseable analysis, using default analysis");
                platform::record_counter("persona_malformed_analysis_total", 1);
                default_analysis()
            }
        }
    }

    /// Deterministic for a given analysis, context and RNG state.
    pub fn generate_from_analysis<R: Rng + ?Sized>(
        &self,
        analysis: &ObjectAnalysis,
        context: &UserContext,
        rng: &mut R,
    ) -> Persona {
        let hints = CoarseHints::from_oracle(&analysis.personality_hints);
        let archetype: Archetype = classify(&hints);

        let mut vector = TraitVector::new();
        archetype.rules().apply(&mut vector, rng);
        let physical = PhysicalTraitAdapter::apply(analysis, &mut vector);
        let purpose = PurposeAdapter::apply(&context.purpose, &mut vector, rng);
        let boosted = apply_jitter(&mut vector, self.config.jitter, &purpose.pinned, rng);

        let humor = HumorMatrix::from_trait_vector(&vector);
        let narrative = NarrativeGenerator::generate(&context.time_together, &context.location, purpose.cluster);

        let name = if context.name.trim().is_empty() {
            generated_name(&analysis.object_type, rng)
        } else {
            context.name.trim().to_string()
        };

        tracing::info!(
            name = %name,
            archetype = archetype.label(),
            physical_rules = physical.len(),
            purpose = purpose.cluster.map(|c| c.label()).unwrap_or("none"),
            boosted = ?boosted,
            "persona generated"
        );
        platform::record_counter("persona_generated_total", 1);

        Persona {
            identity: BasicInfo {
                name,
                object_type: analysis.object_type.clone(),
                description: context.description.clone(),
                purpose: context.purpose.clone(),
                location: context.location.clone(),
                time_together: context.time_together.clone(),
                created_at: now_rfc3339(),
            },
            flaws: flaw_descriptions(&vector),
            contradictions: contradiction_descriptions(&vector),
            communication_style: communication_style(&vector),
            traits: Some(vector),
            humor: Some(humor),
            narrative: Some(narrative),
            version: RECORD_VERSION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::Unconfigured;

    fn generator(seed: u64) -> PersonaGenerator {
        let config = GenerationConfig {
            seed: Some(seed),
            jitter: 5,
        };
        PersonaGenerator::new(config, Arc::new(Unconfigured))
    }

    #[test]
    fn test_generated_name_uses_object_type() {
        let mut rng = StdRng::seed_from_u64(1);
        let name = generated_name("mug", &mut rng);
        assert!(name.ends_with(" Mug"), "{name}");
        assert!(NAME_ADJECTIVES.iter().any(|a| name.starts_with(a)));
        assert!(generated_name("", &mut rng).ends_with(" Thing"));
    }

    #[test]
    fn test_same_seed_same_persona() {
        let analysis = ObjectAnalysis {
            object_type: "lamp".to_string(),
            colors: vec!["yellow".to_string()],
            ..ObjectAnalysis::default()
        };
        let context = UserContext {
            purpose: "help me study".to_string(),
            ..UserContext::default()
        };

        let gen = generator(7);
        let a = gen.generate_from_analysis(&analysis, &context, &mut StdRng::seed_from_u64(7));
        let b = gen.generate_from_analysis(&analysis, &context, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.traits, b.traits);
        assert_eq!(a.name(), b.name());
        assert_eq!(a.flaws, b.flaws);
    }

    #[tokio::test]
    async fn test_oracle_failure_still_yields_full_persona() {
        let context = UserContext {
            name: "Lampy".to_string(),
            time_together: "2 years".to_string(),
            ..UserContext::default()
        };
        let persona = generator(3).generate(&ImageInput::new(vec![1, 2, 3], "image/png"), &context).await;

        assert_eq!(persona.name(), "Lampy");
        assert_eq!(persona.flaws.len(), 4);
        assert_eq!(persona.contradictions.len(), 2);
        assert!(!persona.communication_style.is_empty());
        assert!(persona.traits.is_some());
        assert!(persona.humor.is_some());
        assert!(persona.narrative.is_some());
    }
}
