//! Persona aggregate
//!
//! The coarse [`TraitSummary`] is never stored on the aggregate. It is projected
//! from the trait vector on demand, so the two cannot drift apart.

use serde::{Deserialize, Serialize};
use shared_types::{BasicInfo, Narrative, PersonaRecord, TraitSummary, RECORD_VERSION};

use crate::error::{EngineError, EngineResult};
use crate::humor::HumorMatrix;
use crate::traits::catalog::{A06_TENDER_MINDEDNESS, W03_EMPATHY, W04_COMPASSION};
use crate::traits::{keys_in, TraitCategory, TraitVector};

const EMPATHY_KEYS: [&str; 3] = [W03_EMPATHY, W04_COMPASSION, A06_TENDER_MINDEDNESS];

/// Refine gives up after this many correction passes
const MAX_REFINE_PASSES: usize = 5;

/// One of the coarse summary scores
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SummaryDimension {
    Warmth,
    Competence,
    Extraversion,
    Agreeableness,
    Conscientiousness,
    Neuroticism,
    Creativity,
    Humor,
    Empathy,
}

impl SummaryDimension {
    pub const ALL: [SummaryDimension; 9] = [
        SummaryDimension::Warmth,
        SummaryDimension::Competence,
        SummaryDimension::Extraversion,
        SummaryDimension::Agreeableness,
        SummaryDimension::Conscientiousness,
        SummaryDimension::Neuroticism,
        SummaryDimension::Creativity,
        SummaryDimension::Humor,
        SummaryDimension::Empathy,
    ];

    pub fn parse(name: &str) -> Option<SummaryDimension> {
        let name = name.trim().to_lowercase();
        SummaryDimension::ALL.into_iter().find(|d| d.label() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SummaryDimension::Warmth => "warmth",
            SummaryDimension::Competence => "competence",
            SummaryDimension::Extraversion => "extraversion",
            SummaryDimension::Agreeableness => "agreeableness",
            SummaryDimension::Conscientiousness => "conscientiousness",
            SummaryDimension::Neuroticism => "neuroticism",
            SummaryDimension::Creativity => "creativity",
            SummaryDimension::Humor => "humor",
            SummaryDimension::Empathy => "empathy",
        }
    }

    fn category(&self) -> Option<TraitCategory> {
        match self {
            SummaryDimension::Warmth => Some(TraitCategory::Warmth),
            SummaryDimension::Competence => Some(TraitCategory::Competence),
            SummaryDimension::Extraversion => Some(TraitCategory::Extraversion),
            SummaryDimension::Agreeableness => Some(TraitCategory::Agreeableness),
            SummaryDimension::Conscientiousness => Some(TraitCategory::Conscientiousness),
            SummaryDimension::Neuroticism => Some(TraitCategory::Neuroticism),
            SummaryDimension::Creativity => Some(TraitCategory::Openness),
            SummaryDimension::Humor => Some(TraitCategory::HumorStyle),
            SummaryDimension::Empathy => None,
        }
    }

    /// Trait keys whose mean is this dimension
    pub fn member_keys(&self) -> Vec<&'static str> {
        match self.category() {
            Some(category) => keys_in(category).collect(),
            None => EMPATHY_KEYS.to_vec(),
        }
    }

    pub fn project(&self, vector: &TraitVector) -> f64 {
        match self.category() {
            Some(category) => vector.average_of(category),
            None => vector.mean_of(&EMPATHY_KEYS),
        }
    }

    pub fn read(&self, summary: &TraitSummary) -> u8 {
        match self {
            SummaryDimension::Warmth => summary.warmth,
            SummaryDimension::Competence => summary.competence,
            SummaryDimension::Extraversion => summary.extraversion,
            SummaryDimension::Agreeableness => summary.agreeableness,
            SummaryDimension::Conscientiousness => summary.conscientiousness,
            SummaryDimension::Neuroticism => summary.neuroticism,
            SummaryDimension::Creativity => summary.creativity,
            SummaryDimension::Humor => summary.humor,
            SummaryDimension::Empathy => summary.empathy,
        }
    }
}

fn round_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Coarse projection of a trait vector
pub fn summarize(vector: &TraitVector) -> TraitSummary {
    let get = |d: SummaryDimension| round_score(d.project(vector));
    TraitSummary {
        warmth: get(SummaryDimension::Warmth),
        competence: get(SummaryDimension::Competence),
        extraversion: get(SummaryDimension::Extraversion),
        agreeableness: get(SummaryDimension::Agreeableness),
        conscientiousness: get(SummaryDimension::Conscientiousness),
        neuroticism: get(SummaryDimension::Neuroticism),
        creativity: get(SummaryDimension::Creativity),
        humor: get(SummaryDimension::Humor),
        empathy: get(SummaryDimension::Empathy),
    }
}

/// Best-effort inverse of [`summarize`] for records saved without a full vector.
fn vector_from_summary(summary: &TraitSummary) -> TraitVector {
    let mut vector = TraitVector::new();
    // empathy last: its keys overlap warmth and agreeableness
    for dimension in SummaryDimension::ALL {
        let value = dimension.read(summary) as i64;
        for key in dimension.member_keys() {
            vector.set(key, value);
        }
    }
    for dimension in [SummaryDimension::Warmth, SummaryDimension::Agreeableness] {
        restore_mean_around_empathy(&mut vector, dimension, dimension.read(summary) as i64);
    }
    vector
}

/// Spread the members not shared with empathy so the dimension mean hits `target`.
///
/// Stops short when the free members would have to leave 0..=100.
fn restore_mean_around_empathy(vector: &mut TraitVector, dimension: SummaryDimension, target: i64) {
    let keys = dimension.member_keys();
    let (fixed, free): (Vec<&str>, Vec<&str>) = keys.iter().copied().partition(|k| EMPATHY_KEYS.contains(k));
    if free.is_empty() {
        return;
    }
    let fixed_sum: i64 = fixed.iter().map(|k| vector.value(k) as i64).sum();
    let count = free.len() as i64;
    let needed = (target * keys.len() as i64 - fixed_sum).clamp(0, 100 * count);
    let (base, remainder) = (needed / count, needed % count);
    for (i, key) in free.iter().enumerate() {
        let bump = if (i as i64) < remainder { 1 } else { 0 };
        vector.set(key, base + bump);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    pub identity: BasicInfo,
    pub traits: Option<TraitVector>,
    pub humor: Option<HumorMatrix>,
    pub flaws: Vec<String>,
    pub contradictions: Vec<String>,
    pub communication_style: String,
    pub narrative: Option<Narrative>,
    pub version: String,
}

impl Persona {
    /// A persona with nothing but a name
    pub fn minimal(name: &str) -> Self {
        Self {
            identity: BasicInfo {
                name: name.to_string(),
                ..BasicInfo::default()
            },
            traits: None,
            humor: None,
            flaws: Vec::new(),
            contradictions: Vec::new(),
            communication_style: String::new(),
            narrative: None,
            version: RECORD_VERSION.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Coarse scores; neutral 50s when no trait vector is present.
    pub fn trait_summary(&self) -> TraitSummary {
        self.traits.as_ref().map(summarize).unwrap_or_default()
    }

    /// Move one coarse dimension to `target` by shifting its member variables.
    ///
    /// Creates a default vector when none exists. Returns the projected value
    /// afterwards, which can fall short of `target` when members hit their bounds.
    pub fn refine(&mut self, dimension: SummaryDimension, target: u8) -> u8 {
        let target = target.min(100) as f64;
        let vector = self.traits.get_or_insert_with(TraitVector::new);
        let keys = dimension.member_keys();

        for _ in 0..MAX_REFINE_PASSES {
            let gap = target - dimension.project(vector);
            if gap.abs() < 0.5 {
                break;
            }
            let step = gap.round() as i32;
            let step = if step == 0 { gap.signum() as i32 } else { step };
            for key in &keys {
                vector.apply_delta(key, step);
            }
        }

        let reached = round_score(dimension.project(vector));
        tracing::info!(
            persona = %self.identity.name,
            dimension = dimension.label(),
            target,
            reached,
            "persona refined"
        );
        reached
    }

    pub fn to_record(&self) -> PersonaRecord {
        PersonaRecord {
            basic_info: Some(self.identity.clone()),
            trait_summary: Some(self.trait_summary()),
            full_trait_vector: self.traits.as_ref().map(TraitVector::to_map),
            humor_matrix: self.humor.as_ref().map(HumorMatrix::to_record),
            flaws: self.flaws.clone(),
            contradictions: self.contradictions.clone(),
            communication_style: self.communication_style.clone(),
            narrative: self.narrative.clone(),
            version: self.version.clone(),
        }
    }

    /// Lenient load: accepts partial and older records as long as they carry an identity block.
    pub fn from_record(record: PersonaRecord) -> EngineResult<Self> {
        let identity = record
            .basic_info
            .ok_or_else(|| EngineError::InvalidPersonaRecord("missing identity block".to_string()))?;
        if identity.name.trim().is_empty() {
            return Err(EngineError::InvalidPersonaRecord("identity block has no name".to_string()));
        }

        let traits = match (&record.full_trait_vector, &record.trait_summary) {
            (Some(map), _) => Some(TraitVector::from_map(map)),
            (None, Some(summary)) => Some(vector_from_summary(summary)),
            (None, None) => None,
        };

        let version = if record.version.is_empty() {
            RECORD_VERSION.to_string()
        } else {
            record.version
        };

        Ok(Self {
            identity,
            traits,
            humor: record.humor_matrix.as_ref().map(HumorMatrix::from_record),
            flaws: record.flaws,
            contradictions: record.contradictions,
            communication_style: record.communication_style,
            narrative: record.narrative,
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_is_projection_of_vector() {
        let mut persona = Persona::minimal("Kettle");
        assert_eq!(persona.trait_summary(), TraitSummary::default());

        let mut vector = TraitVector::new();
        for key in keys_in(TraitCategory::Warmth) {
            vector.set(key, 80);
        }
        vector.set(A06_TENDER_MINDEDNESS, 20);
        persona.traits = Some(vector);

        let summary = persona.trait_summary();
        assert_eq!(summary.warmth, 80);
        assert_eq!(summary.empathy, 60);
        assert_eq!(summary.competence, 50);
        assert_eq!(summary.agreeableness, 45);
    }

    #[test]
    fn test_refine_writes_through_to_vector() {
        let mut persona = Persona::minimal("Lamp");
        let reached = persona.refine(SummaryDimension::Warmth, 85);

        assert_eq!(reached, 85);
        assert_eq!(persona.trait_summary().warmth, 85);
        let vector = persona.traits.as_ref().unwrap();
        assert!(keys_in(TraitCategory::Warmth).all(|k| vector.value(k) == 85));
    }

    #[test]
    fn test_refine_converges_with_clamped_member() {
        let mut vector = TraitVector::new();
        vector.set(W03_EMPATHY, 100);
        let mut persona = Persona::minimal("Lamp");
        persona.traits = Some(vector);

        assert_eq!(persona.refine(SummaryDimension::Empathy, 100), 100);
        assert_eq!(persona.refine(SummaryDimension::Empathy, 0), 0);
        assert_eq!(persona.trait_summary().empathy, 0);
    }

    #[test]
    fn test_record_round_trip_keeps_vector() {
        let mut persona = Persona::minimal("Mug");
        persona.refine(SummaryDimension::Humor, 70);
        persona.humor = Some(HumorMatrix::new(20.0, 80.0, 90.0));
        persona.flaws = vec!["Nags".to_string()];

        let restored = Persona::from_record(persona.to_record()).unwrap();
        assert_eq!(restored, persona);
    }

    #[test]
    fn test_from_record_requires_identity() {
        let err = Persona::from_record(PersonaRecord::default()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPersonaRecord(_)));
    }

    #[test]
    fn test_from_record_rebuilds_vector_from_summary() {
        let record: PersonaRecord = serde_json::from_str(
            r#"{"identity": {"name": "Old"}, "trait_summary": {"warmth": 80, "humor": 30}}"#,
        )
        .unwrap();
        let persona = Persona::from_record(record).unwrap();

        let summary = persona.trait_summary();
        assert_eq!(summary.humor, 30);
        assert_eq!(summary.competence, 50);
        assert!(persona.traits.is_some());
        assert_eq!(persona.version, RECORD_VERSION);
    }

    #[test]
    fn test_rebuilt_vector_reproduces_every_stored_dimension() {
        let stored = TraitSummary {
            warmth: 80,
            competence: 65,
            extraversion: 40,
            agreeableness: 20,
            conscientiousness: 72,
            neuroticism: 33,
            creativity: 58,
            humor: 91,
            empathy: 50,
        };
        let record = PersonaRecord {
            basic_info: Some(BasicInfo {
                name: "Old".to_string(),
                ..BasicInfo::default()
            }),
            trait_summary: Some(stored),
            ..PersonaRecord::default()
        };

        let persona = Persona::from_record(record).unwrap();
        assert_eq!(persona.trait_summary(), stored);
        let vector = persona.traits.as_ref().unwrap();
        assert!(EMPATHY_KEYS.iter().all(|k| vector.value(k) == 50));
    }

    #[test]
    fn test_minimal_record_has_no_vector() {
        let record: PersonaRecord = serde_json::from_str(r#"{"identity": {"name": "X"}}"#).unwrap();
        let persona = Persona::from_record(record).unwrap();
        assert!(persona.traits.is_none());
        assert!(persona.humor.is_none());
        assert!(persona.narrative.is_none());
    }
}
