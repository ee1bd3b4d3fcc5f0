// === PERSONA RECORD TYPES ===
// Shapes exchanged with the image oracle and the persistence store

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coarse personality hints returned by the image oracle (each 0-100)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalityHints {
    pub warmth_factor: u8,
    pub competence_factor: u8,
    pub humor_factor: u8,
}

impl Default for PersonalityHints {
    fn default() -> Self {
        Self {
            warmth_factor: 50,
            competence_factor: 50,
            humor_factor: 75,
        }
    }
}

/// Structured description of the photographed object
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ObjectAnalysis {
    pub object_type: String,
    pub colors: Vec<String>,
    pub shape: String,
    pub size: String,
    pub materials: Vec<String>,
    pub condition: String,
    pub estimated_age: String,
    pub distinctive_features: Vec<String>,
    pub personality_hints: PersonalityHints,
}

impl Default for ObjectAnalysis {
    fn default() -> Self {
        Self {
            object_type: "object".to_string(),
            colors: vec!["gray".to_string()],
            shape: "ordinary".to_string(),
            size: "medium".to_string(),
            materials: vec!["unknown".to_string()],
            condition: "fine".to_string(),
            estimated_age: "unknown".to_string(),
            distinctive_features: Vec::new(),
            personality_hints: PersonalityHints::default(),
        }
    }
}

/// Identity block of a persisted persona
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BasicInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub object_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub time_together: String,
    #[serde(default)]
    pub created_at: String,
}

/// Coarse trait projection. Each value is the rounded mean of its trait category.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct TraitSummary {
    pub warmth: u8,
    pub competence: u8,
    pub extraversion: u8,
    pub agreeableness: u8,
    pub conscientiousness: u8,
    pub neuroticism: u8,
    pub creativity: u8,
    pub humor: u8,
    pub empathy: u8,
}

impl Default for TraitSummary {
    fn default() -> Self {
        Self {
            warmth: 50,
            competence: 50,
            extraversion: 50,
            agreeableness: 50,
            conscientiousness: 50,
            neuroticism: 50,
            creativity: 50,
            humor: 50,
            empathy: 50,
        }
    }
}

/// Persisted humor matrix: three axes plus the derived attributes at save time
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct HumorMatrixRecord {
    pub warmth_vs_wit: f64,
    pub self_vs_observational: f64,
    pub subtle_vs_expressive: f64,
    pub sarcasm: f64,
    pub absurdity: f64,
    pub wordplay_frequency: f64,
    pub callback_tendency: f64,
    pub humor_density: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RelationshipInsight {
    pub understanding_level: String,
    pub trust_level: String,
    pub communication_style: String,
    pub future_expectation: String,
}

/// Life story attached to a persona
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Narrative {
    pub time_bucket: String,
    pub arrival_story: String,
    pub relationship_depth: String,
    pub memories: Vec<String>,
    pub emotional_state: String,
    pub complaints: Vec<String>,
    pub satisfactions: Vec<String>,
    pub wishes: Vec<String>,
    pub environment: Vec<String>,
    pub insight: RelationshipInsight,
}

/// On-disk persona record. Every section except the identity block is optional so
/// records written by older versions still deserialize.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PersonaRecord {
    #[serde(alias = "identity", default, skip_serializing_if = "Option::is_none")]
    pub basic_info: Option<BasicInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trait_summary: Option<TraitSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_trait_vector: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humor_matrix: Option<HumorMatrixRecord>,
    #[serde(default)]
    pub flaws: Vec<String>,
    #[serde(default)]
    pub contradictions: Vec<String>,
    #[serde(default)]
    pub communication_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<Narrative>,
    #[serde(default)]
    pub version: String,
}

/// Listing entry returned by a persona store
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PersonaSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub created_at: String,
    pub handle: String,
}

pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
