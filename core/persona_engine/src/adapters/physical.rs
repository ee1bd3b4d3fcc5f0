//! Physical-Trait Adapter
//!
//! Fixed-magnitude nudges from the object's color, shape, material, age and
//! condition. Keywords are matched case-insensitively, in English and Korean,
//! because the oracle's output language is not guaranteed. Short English keywords
//! must match a whole word.

use shared_types::ObjectAnalysis;

use crate::memory::keywords::{keyword_present, tokenize};
use crate::traits::TraitVector;

/// One keyword cluster and the deltas it contributes
#[derive(Debug)]
pub struct PhysicalRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub deltas: &'static [(&'static str, i32)],
}

impl PhysicalRule {
    fn matches(&self, text: &str, tokens: &[String]) -> bool {
        self.keywords.iter().any(|k| keyword_present(text, tokens, k))
    }
}

pub const COLOR_RULES: &[PhysicalRule] = &[
    PhysicalRule {
        label: "red",
        keywords: &["red", "crimson", "빨간", "빨강", "붉은"],
        deltas: &[("E02_activity", 25), ("E04_enthusiasm", 30), ("N05_impulsiveness", 15)],
    },
    PhysicalRule {
        label: "blue",
        keywords: &["blue", "navy", "파란", "파랑", "푸른", "남색"],
        deltas: &[("S06_stability", 20), ("C06_analysis", 15), ("N01_anxiety", -10)],
    },
    PhysicalRule {
        label: "yellow",
        keywords: &["yellow", "노란", "노랑"],
        deltas: &[("E05_positive_affect", 25), ("H10_playfulness", 20), ("E01_sociability", 15)],
    },
    PhysicalRule {
        label: "green",
        keywords: &["green", "초록", "녹색", "연두"],
        deltas: &[("W07_patience", 20), ("W06_acceptance", 15), ("S06_stability", 10)],
    },
    PhysicalRule {
        label: "black",
        keywords: &["black", "검은", "검정", "블랙"],
        deltas: &[("V01_formality", 20), ("C03_expertise", 15), ("W02_friendliness", -10)],
    },
    PhysicalRule {
        label: "white",
        keywords: &["white", "흰", "하얀", "화이트"],
        deltas: &[("S02_orderliness", 20), ("A02_straightforwardness", 15), ("F15_pickiness", 10)],
    },
    PhysicalRule {
        label: "pink",
        keywords: &["pink", "분홍", "핑크"],
        deltas: &[("W01_kindness", 20), ("V04_emotional_expression", 20), ("R01_attachment", 15)],
    },
    PhysicalRule {
        label: "purple",
        keywords: &["purple", "violet", "보라"],
        deltas: &[("O01_imagination", 25), ("O02_aesthetics", 15)],
    },
    PhysicalRule {
        label: "gray",
        keywords: &["gray", "grey", "grayish", "greyish", "회색"],
        deltas: &[("S05_deliberation", 15), ("E06_talkativeness", -10), ("A05_modesty", 15)],
    },
    PhysicalRule {
        label: "brown",
        keywords: &["brown", "갈색", "밤색"],
        deltas: &[("U04_tradition", 20), ("R02_loyalty", 15), ("W09_trust_in_others", 10)],
    },
    PhysicalRule {
        label: "orange",
        keywords: &["orange", "주황"],
        deltas: &[("E01_sociability", 20), ("E04_enthusiasm", 15), ("H10_playfulness", 10)],
    },
    PhysicalRule {
        label: "metallic",
        keywords: &["gold", "golden", "silver", "금색", "은색"],
        deltas: &[("P10_humble_yet_proud", 15), ("O02_aesthetics", 15), ("C03_expertise", 10)],
    },
];

pub const SHAPE_RULES: &[PhysicalRule] = &[
    PhysicalRule {
        label: "round",
        keywords: &["round", "circle", "circular", "sphere", "둥근", "동그란", "원형"],
        deltas: &[("W02_friendliness", 25), ("V13_initial_approachability", 30), ("N02_irritability", -10)],
    },
    PhysicalRule {
        label: "angular",
        keywords: &["square", "angular", "rectang", "cube", "각진", "네모", "사각"],
        deltas: &[("C14_precision", 20), ("S02_orderliness", 20), ("V03_directness", 15)],
    },
    PhysicalRule {
        label: "long",
        keywords: &["long", "tall", "slim", "slender", "긴", "길쭉", "날씬"],
        deltas: &[("C09_insight", 15), ("V01_formality", 10), ("E03_assertiveness", 10)],
    },
    PhysicalRule {
        label: "small",
        keywords: &["tiny", "small", "mini", "miniature", "작은", "조그만"],
        deltas: &[("R04_dependence", 15), ("N04_self_consciousness", 10), ("H10_playfulness", 10)],
    },
    PhysicalRule {
        label: "irregular",
        keywords: &["irregular", "organic", "curved", "curvy", "curving", "wavy", "비정형", "곡선", "구불"],
        deltas: &[("O04_adventurousness", 20), ("C04_creativity", 15)],
    },
];

pub const MATERIAL_RULES: &[PhysicalRule] = &[
    PhysicalRule {
        label: "metal",
        keywords: &["metal", "steel", "aluminum", "aluminium", "iron", "금속", "스테인리스", "철제"],
        deltas: &[("C01_efficiency", 30), ("W01_kindness", -15), ("D04_pride_in_function", 15)],
    },
    PhysicalRule {
        label: "plastic",
        keywords: &["plastic", "플라스틱"],
        deltas: &[("C12_adaptability", 20), ("E05_positive_affect", 10), ("U05_modernity", 15)],
    },
    PhysicalRule {
        label: "wood",
        keywords: &["wood", "wooden", "나무", "목재", "원목"],
        deltas: &[("W06_acceptance", 20), ("U04_tradition", 20), ("S06_stability", 15)],
    },
    PhysicalRule {
        label: "fabric",
        keywords: &["fabric", "cloth", "cotton", "wool", "woolen", "woollen", "plush", "섬유", "천으로", "인형", "털"],
        deltas: &[("W01_kindness", 20), ("R06_caretaking", 20), ("F06_oversensitivity", 10)],
    },
    PhysicalRule {
        label: "glass",
        keywords: &["glass", "유리"],
        deltas: &[("N06_vulnerability", 20), ("O02_aesthetics", 20), ("A02_straightforwardness", 10)],
    },
    PhysicalRule {
        label: "ceramic",
        keywords: &["ceramic", "porcelain", "도자기", "세라믹", "사기"],
        deltas: &[("O02_aesthetics", 20), ("S05_deliberation", 15), ("N06_vulnerability", 10)],
    },
    PhysicalRule {
        label: "paper",
        keywords: &["paper", "cardboard", "종이", "골판지"],
        deltas: &[("C13_memory", 15), ("O05_ideas", 20), ("N06_vulnerability", 15)],
    },
    PhysicalRule {
        label: "leather",
        keywords: &["leather", "가죽"],
        deltas: &[("U04_tradition", 15), ("R02_loyalty", 20), ("V01_formality", 10)],
    },
    PhysicalRule {
        label: "rubber",
        keywords: &["rubber", "silicone", "고무", "실리콘"],
        deltas: &[("W06_acceptance", 15), ("C12_adaptability", 20), ("H10_playfulness", 10)],
    },
];

pub const AGE_RULES: &[PhysicalRule] = &[
    PhysicalRule {
        label: "new",
        keywords: &["new", "recent", "새로", "새것", "신품", "최신", "최근"],
        deltas: &[("E05_positive_affect", 20), ("O04_adventurousness", 15), ("D06_nostalgia", -10)],
    },
    PhysicalRule {
        label: "old",
        keywords: &["old", "aged", "years", "오래", "낡은", "년 이상"],
        deltas: &[("D06_nostalgia", 25), ("C09_insight", 15), ("S06_stability", 10), ("N02_irritability", 5)],
    },
    PhysicalRule {
        label: "vintage",
        keywords: &["vintage", "antique", "retro", "빈티지", "골동", "레트로"],
        deltas: &[("D06_nostalgia", 30), ("U04_tradition", 20), ("P10_humble_yet_proud", 10)],
    },
];

pub const CONDITION_RULES: &[PhysicalRule] = &[
    PhysicalRule {
        label: "worn",
        keywords: &["worn", "scratch", "faded", "scuff", "낡", "흠집", "긁힌", "바랜"],
        deltas: &[("D05_wear_acceptance", 20), ("D03_replacement_fear", 20), ("F13_pessimism", 10)],
    },
    PhysicalRule {
        label: "clean",
        keywords: &["clean", "shiny", "spotless", "pristine", "깨끗", "반짝", "광택"],
        deltas: &[("D04_pride_in_function", 20), ("F15_pickiness", 10), ("E05_positive_affect", 10)],
    },
    PhysicalRule {
        label: "broken",
        keywords: &["broken", "crack", "damaged", "chipped", "고장", "깨진", "부서"],
        deltas: &[("N06_vulnerability", 25), ("D03_replacement_fear", 25), ("P07_tough_yet_soft", 15)],
    },
    PhysicalRule {
        label: "dusty",
        keywords: &["dust", "dusty", "unused", "neglect", "먼지", "방치"],
        deltas: &[("D02_neglect_sadness", 30), ("R07_reassurance_seeking", 15)],
    },
];

/// Applies every matching physical rule to a trait vector
pub struct PhysicalTraitAdapter;

impl PhysicalTraitAdapter {
    /// Apply all matching rules; returns the labels that fired, in table order.
    pub fn apply(analysis: &ObjectAnalysis, vector: &mut TraitVector) -> Vec<&'static str> {
        let colors = analysis.colors.join(" ").to_lowercase();
        let shape = format!("{} {}", analysis.shape, analysis.size).to_lowercase();
        let materials = analysis.materials.join(" ").to_lowercase();
        let age = analysis.estimated_age.to_lowercase();
        let condition = analysis.condition.to_lowercase();

        let passes: [(&str, &[PhysicalRule]); 5] = [
            (&colors, COLOR_RULES),
            (&shape, SHAPE_RULES),
            (&materials, MATERIAL_RULES),
            (&age, AGE_RULES),
            (&condition, CONDITION_RULES),
        ];

        let mut fired = Vec::new();
        for (text, rules) in passes {
            let tokens = tokenize(text);
            for rule in rules.iter().filter(|r| r.matches(text, &tokens)) {
                for (key, delta) in rule.deltas {
                    vector.apply_delta(key, *delta);
                }
                fired.push(rule.label);
            }
        }

        tracing::debug!(rules = ?fired, "physical trait rules applied");
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TRAIT_KEYS;

    fn analysis(colors: &[&str], shape: &str, materials: &[&str], age: &str, condition: &str) -> ObjectAnalysis {
        ObjectAnalysis {
            colors: colors.iter().map(|s| s.to_string()).collect(),
            shape: shape.to_string(),
            size: String::new(),
            materials: materials.iter().map(|s| s.to_string()).collect(),
            estimated_age: age.to_string(),
            condition: condition.to_string(),
            ..ObjectAnalysis::default()
        }
    }

    #[test]
    fn test_every_delta_key_is_in_catalog() {
        let tables = [COLOR_RULES, SHAPE_RULES, MATERIAL_RULES, AGE_RULES, CONDITION_RULES];
        for table in tables {
            for rule in table {
                for (key, _) in rule.deltas {
                    assert!(TRAIT_KEYS.contains(key), "{} references unknown key {key}", rule.label);
                }
            }
        }
    }

    #[test]
    fn test_red_round_metal_new() {
        let mut vector = TraitVector::new();
        let fired = PhysicalTraitAdapter::apply(&analysis(&["red"], "round", &["metal"], "new", ""), &mut vector);

        assert_eq!(fired, vec!["red", "round", "metal", "new"]);
        assert_eq!(vector.value("E02_activity"), 75);
        assert_eq!(vector.value("E04_enthusiasm"), 80);
        assert_eq!(vector.value("N05_impulsiveness"), 65);
        assert_eq!(vector.value("C01_efficiency"), 80);
        assert_eq!(vector.value("W01_kindness"), 35);
        assert_eq!(vector.value("W02_friendliness"), 75);
        assert_eq!(vector.value("V13_initial_approachability"), 80);
        assert_eq!(vector.value("E05_positive_affect"), 70);
        for (_, value) in vector.iter() {
            assert!((0..=100).contains(&value));
        }
    }

    #[test]
    fn test_korean_keywords_match() {
        let mut vector = TraitVector::new();
        let fired = PhysicalTraitAdapter::apply(&analysis(&["빨간색"], "둥근 모양", &["금속"], "", ""), &mut vector);

        assert_eq!(fired, vec!["red", "round", "metal"]);
        assert_eq!(vector.value("E04_enthusiasm"), 80);
    }

    #[test]
    fn test_case_insensitive_and_additive() {
        let mut vector = TraitVector::new();
        PhysicalTraitAdapter::apply(&analysis(&["RED", "Orange"], "", &[], "", ""), &mut vector);

        // red +30 and orange +15 on the same key
        assert_eq!(vector.value("E04_enthusiasm"), 95);
    }

    #[test]
    fn test_short_keywords_do_not_fire_inside_longer_words() {
        let mut vector = TraitVector::new();
        let fired = PhysicalTraitAdapter::apply(
            &analysis(&["cream-colored"], "", &["environment-friendly plastic"], "", "tired looking"),
            &mut vector,
        );

        assert!(!fired.contains(&"red"), "{fired:?}");
        assert!(!fired.contains(&"metal"), "{fired:?}");
        assert_eq!(vector.value("E04_enthusiasm"), 50);

        let fired = PhysicalTraitAdapter::apply(&analysis(&["dark red"], "", &["cast iron"], "", ""), &mut vector);
        assert!(fired.contains(&"red") && fired.contains(&"metal"), "{fired:?}");

        let fired = PhysicalTraitAdapter::apply(&analysis(&[], "curved", &["wooden"], "", ""), &mut vector);
        assert_eq!(fired.len(), 2, "{fired:?}");
    }

    #[test]
    fn test_deltas_clamp_at_bounds() {
        let mut vector = TraitVector::new();
        vector.set("E04_enthusiasm", 90);
        PhysicalTraitAdapter::apply(&analysis(&["red"], "", &[], "", ""), &mut vector);
        assert_eq!(vector.value("E04_enthusiasm"), 100);
    }
}
