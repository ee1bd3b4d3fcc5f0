//! Fixed catalog of personality variables.
//!
//! Every key is `<category letter><two digit index>_<name>`, so a category is
//! addressable by its one-letter prefix.

use serde::{Deserialize, Serialize};

/// Semantic grouping of trait variables
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    Warmth,
    Competence,
    Extraversion,
    Agreeableness,
    Conscientiousness,
    Neuroticism,
    Openness,
    FlawTendency,
    ContradictionTendency,
    CommunicationStyle,
    HumorStyle,
    RelationshipStyle,
    ObjectEmotion,
    CulturalIdentity,
}

impl TraitCategory {
    pub const ALL: [TraitCategory; 14] = [
        TraitCategory::Warmth,
        TraitCategory::Competence,
        TraitCategory::Extraversion,
        TraitCategory::Agreeableness,
        TraitCategory::Conscientiousness,
        TraitCategory::Neuroticism,
        TraitCategory::Openness,
        TraitCategory::FlawTendency,
        TraitCategory::ContradictionTendency,
        TraitCategory::CommunicationStyle,
        TraitCategory::HumorStyle,
        TraitCategory::RelationshipStyle,
        TraitCategory::ObjectEmotion,
        TraitCategory::CulturalIdentity,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            TraitCategory::Warmth => "W",
            TraitCategory::Competence => "C",
            TraitCategory::Extraversion => "E",
            TraitCategory::Agreeableness => "A",
            TraitCategory::Conscientiousness => "S",
            TraitCategory::Neuroticism => "N",
            TraitCategory::Openness => "O",
            TraitCategory::FlawTendency => "F",
            TraitCategory::ContradictionTendency => "P",
            TraitCategory::CommunicationStyle => "V",
            TraitCategory::HumorStyle => "H",
            TraitCategory::RelationshipStyle => "R",
            TraitCategory::ObjectEmotion => "D",
            TraitCategory::CulturalIdentity => "U",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TraitCategory::Warmth => "warmth",
            TraitCategory::Competence => "competence",
            TraitCategory::Extraversion => "extraversion",
            TraitCategory::Agreeableness => "agreeableness",
            TraitCategory::Conscientiousness => "conscientiousness",
            TraitCategory::Neuroticism => "neuroticism",
            TraitCategory::Openness => "openness",
            TraitCategory::FlawTendency => "flaw tendency",
            TraitCategory::ContradictionTendency => "contradiction tendency",
            TraitCategory::CommunicationStyle => "communication style",
            TraitCategory::HumorStyle => "humor style",
            TraitCategory::RelationshipStyle => "relationship style",
            TraitCategory::ObjectEmotion => "object emotion",
            TraitCategory::CulturalIdentity => "cultural identity",
        }
    }

    /// Starting value for every variable of this category
    pub fn default_value(&self) -> i32 {
        match self {
            TraitCategory::FlawTendency => 15,
            TraitCategory::ContradictionTendency => 10,
            _ => 50,
        }
    }

    pub fn of_key(key: &str) -> Option<TraitCategory> {
        TraitCategory::ALL
            .into_iter()
            .find(|c| key.starts_with(c.prefix()))
    }
}

pub const W01_KINDNESS: &str = "W01_kindness";
pub const W02_FRIENDLINESS: &str = "W02_friendliness";
pub const W03_EMPATHY: &str = "W03_empathy";
pub const W04_COMPASSION: &str = "W04_compassion";
pub const W07_PATIENCE: &str = "W07_patience";
pub const W08_ENCOURAGEMENT: &str = "W08_encouragement";
pub const C01_EFFICIENCY: &str = "C01_efficiency";
pub const C04_CREATIVITY: &str = "C04_creativity";
pub const C16_MOTIVATION: &str = "C16_motivation_capability";
pub const E02_ACTIVITY: &str = "E02_activity";
pub const E04_ENTHUSIASM: &str = "E04_enthusiasm";
pub const E05_POSITIVE_AFFECT: &str = "E05_positive_affect";
pub const A06_TENDER_MINDEDNESS: &str = "A06_tender_mindedness";
pub const S01_SELF_DISCIPLINE: &str = "S01_self_discipline";
pub const S06_STABILITY: &str = "S06_stability";
pub const N05_IMPULSIVENESS: &str = "N05_impulsiveness";
pub const V02_VERBOSITY: &str = "V02_verbosity";
pub const V03_DIRECTNESS: &str = "V03_directness";
pub const V13_APPROACHABILITY: &str = "V13_initial_approachability";

pub const TRAIT_KEYS: [&str; 127] = [
    // warmth
    W01_KINDNESS,
    W02_FRIENDLINESS,
    W03_EMPATHY,
    W04_COMPASSION,
    "W05_generosity",
    "W06_acceptance",
    W07_PATIENCE,
    W08_ENCOURAGEMENT,
    "W09_trust_in_others",
    "W10_gratitude",
    // competence
    C01_EFFICIENCY,
    "C02_intelligence",
    "C03_expertise",
    C04_CREATIVITY,
    "C05_problem_solving",
    "C06_analysis",
    "C07_learning",
    "C08_judgment",
    "C09_insight",
    "C10_planning",
    "C11_execution",
    "C12_adaptability",
    "C13_memory",
    "C14_precision",
    "C15_resourcefulness",
    C16_MOTIVATION,
    // extraversion
    "E01_sociability",
    E02_ACTIVITY,
    "E03_assertiveness",
    E04_ENTHUSIASM,
    E05_POSITIVE_AFFECT,
    "E06_talkativeness",
    // agreeableness
    "A01_trust",
    "A02_straightforwardness",
    "A03_altruism",
    "A04_compliance",
    "A05_modesty",
    A06_TENDER_MINDEDNESS,
    // conscientiousness
    S01_SELF_DISCIPLINE,
    "S02_orderliness",
    "S03_dutifulness",
    "S04_achievement_striving",
    "S05_deliberation",
    S06_STABILITY,
    // neuroticism
    "N01_anxiety",
    "N02_irritability",
    "N03_moodiness",
    "N04_self_consciousness",
    N05_IMPULSIVENESS,
    "N06_vulnerability",
    // openness
    "O01_imagination",
    "O02_aesthetics",
    "O03_feelings",
    "O04_adventurousness",
    "O05_ideas",
    "O06_values",
    // flaw tendency
    "F01_perfectionism_anxiety",
    "F02_indecisiveness",
    "F03_excessive_worry",
    "F04_procrastination",
    "F05_stubbornness",
    "F06_oversensitivity",
    "F07_jealousy",
    "F08_forgetfulness",
    "F09_clumsiness",
    "F10_impatience",
    "F11_nagging",
    "F12_attention_seeking",
    "F13_pessimism",
    "F14_overconfidence",
    "F15_pickiness",
    // contradiction tendency
    "P01_confident_outside_anxious_inside",
    "P02_logical_yet_emotional",
    "P03_social_yet_lonely",
    "P04_independent_yet_clingy",
    "P05_calm_yet_explosive",
    "P06_lazy_yet_perfectionist",
    "P07_tough_yet_soft",
    "P08_cynical_yet_hopeful",
    "P09_orderly_yet_chaotic",
    "P10_humble_yet_proud",
    // communication style
    "V01_formality",
    V02_VERBOSITY,
    V03_DIRECTNESS,
    "V04_emotional_expression",
    "V05_question_frequency",
    "V06_emoji_tendency",
    "V07_slang_usage",
    "V08_speech_speed",
    "V09_politeness",
    "V10_storytelling",
    "V11_metaphor_usage",
    "V12_listening",
    V13_APPROACHABILITY,
    "V14_exclamation",
    "V15_topic_shifting",
    // humor style
    "H01_wordplay",
    "H02_sarcasm",
    "H03_self_deprecation",
    "H04_observational",
    "H05_absurdity",
    "H06_timing",
    "H07_wit",
    "H08_gentle_teasing",
    "H09_dark_humor",
    "H10_playfulness",
    // relationship style
    "R01_attachment",
    "R02_loyalty",
    "R03_protectiveness",
    "R04_dependence",
    "R05_boundary_respect",
    "R06_caretaking",
    "R07_reassurance_seeking",
    "R08_teasing_intimacy",
    "R09_conflict_avoidance",
    "R10_long_term_commitment",
    // object-specific emotion
    "D01_usage_satisfaction",
    "D02_neglect_sadness",
    "D03_replacement_fear",
    "D04_pride_in_function",
    "D05_wear_acceptance",
    "D06_nostalgia",
    // cultural identity
    "U01_jeong",
    "U02_nunchi",
    "U03_hospitality",
    "U04_tradition",
    "U05_modernity",
];

/// Catalog keys belonging to `category`, in catalog order
pub fn keys_in(category: TraitCategory) -> impl Iterator<Item = &'static str> {
    TRAIT_KEYS
        .into_iter()
        .filter(move |k| k.starts_with(category.prefix()))
}

/// Human-readable name of a key: `"W03_empathy"` -> `"empathy"`
pub fn display_name(key: &str) -> String {
    key.split_once('_')
        .map(|(_, rest)| rest.replace('_', " "))
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_keys_unique_and_categorized() {
        let unique: HashSet<_> = TRAIT_KEYS.iter().collect();
        assert_eq!(unique.len(), TRAIT_KEYS.len());

        for key in TRAIT_KEYS {
            assert!(TraitCategory::of_key(key).is_some(), "uncategorized key {key}");
        }
    }

    #[test]
    fn test_category_sizes() {
        let sizes: Vec<usize> = TraitCategory::ALL.iter().map(|c| keys_in(*c).count()).collect();
        assert_eq!(sizes, vec![10, 16, 6, 6, 6, 6, 6, 15, 10, 15, 10, 10, 6, 5]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(W03_EMPATHY), "empathy");
        assert_eq!(display_name(C16_MOTIVATION), "motivation capability");
    }
}
