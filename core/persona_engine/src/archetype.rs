//! Archetype Rules
//!
//! Coarse (warmth, competence, humor) hints select one of nine base archetypes
//! through a first-match decision table. Each archetype pushes variable groups into
//! characteristic ranges and raises its signature flaws.

use rand::Rng;
use serde::{Deserialize, Serialize};
use shared_types::PersonalityHints;

use crate::traits::{keys_in, TraitCategory, TraitVector};

/// Base personality type
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    WarmCounselor,
    EnthusiasticEntertainer,
    ColdPerfectionist,
    WittyGenius,
    ReliableMentor,
    PlayfulTroublemaker,
    SarcasticObserver,
    ShyDreamer,
    BalancedFriend,
}

impl Archetype {
    pub const ALL: [Archetype; 9] = [
        Archetype::WarmCounselor,
        Archetype::EnthusiasticEntertainer,
        Archetype::ColdPerfectionist,
        Archetype::WittyGenius,
        Archetype::ReliableMentor,
        Archetype::PlayfulTroublemaker,
        Archetype::SarcasticObserver,
        Archetype::ShyDreamer,
        Archetype::BalancedFriend,
    ];

    pub fn label(&self) -> &'static str {
        self.rules().label
    }

    pub fn rules(&self) -> &'static ArchetypeRules {
        // ARCHETYPE_RULES is declared in `Archetype::ALL` order
        &ARCHETYPE_RULES[*self as usize]
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Coarse scores used to pick an archetype (each 0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoarseHints {
    pub warmth: u8,
    pub competence: u8,
    pub humor: u8,
}

impl CoarseHints {
    /// Convert oracle hints. Humor is biased into [50, 100] so every persona keeps
    /// some comic capability.
    pub fn from_oracle(hints: &PersonalityHints) -> Self {
        Self {
            warmth: hints.warmth_factor.min(100),
            competence: hints.competence_factor.min(100),
            humor: 50 + hints.humor_factor.min(100) / 2,
        }
    }
}

/// Inclusive bound on one hint; `None` means unconstrained
#[derive(Debug, Clone, Copy)]
struct Bound {
    min: Option<u8>,
    max: Option<u8>,
}

impl Bound {
    const ANY: Bound = Bound { min: None, max: None };

    const fn at_least(v: u8) -> Bound {
        Bound { min: Some(v), max: None }
    }

    const fn at_most(v: u8) -> Bound {
        Bound { min: None, max: Some(v) }
    }

    fn admits(&self, value: u8) -> bool {
        self.min.map_or(true, |m| value >= m) && self.max.map_or(true, |m| value <= m)
    }
}

struct DecisionRow {
    warmth: Bound,
    competence: Bound,
    humor: Bound,
    archetype: Archetype,
}

impl DecisionRow {
    fn matches(&self, hints: &CoarseHints) -> bool {
        self.warmth.admits(hints.warmth)
            && self.competence.admits(hints.competence)
            && self.humor.admits(hints.humor)
    }
}

const DECISION_TABLE: [DecisionRow; 8] = [
    DecisionRow {
        warmth: Bound::at_least(75),
        competence: Bound::at_most(40),
        humor: Bound::ANY,
        archetype: Archetype::WarmCounselor,
    },
    DecisionRow {
        warmth: Bound::at_least(70),
        competence: Bound::ANY,
        humor: Bound::at_least(70),
        archetype: Archetype::EnthusiasticEntertainer,
    },
    DecisionRow {
        warmth: Bound::at_most(40),
        competence: Bound::at_least(70),
        humor: Bound::ANY,
        archetype: Archetype::ColdPerfectionist,
    },
    DecisionRow {
        warmth: Bound::ANY,
        competence: Bound::at_least(70),
        humor: Bound::at_least(70),
        archetype: Archetype::WittyGenius,
    },
    DecisionRow {
        warmth: Bound::at_least(65),
        competence: Bound::at_least(65),
        humor: Bound::ANY,
        archetype: Archetype::ReliableMentor,
    },
    DecisionRow {
        warmth: Bound::ANY,
        competence: Bound::at_most(40),
        humor: Bound::at_least(80),
        archetype: Archetype::PlayfulTroublemaker,
    },
    DecisionRow {
        warmth: Bound::at_most(35),
        competence: Bound::ANY,
        humor: Bound::at_least(60),
        archetype: Archetype::SarcasticObserver,
    },
    DecisionRow {
        warmth: Bound::at_most(40),
        competence: Bound::at_most(40),
        humor: Bound::ANY,
        archetype: Archetype::ShyDreamer,
    },
];

/// Select the archetype for `hints`. Falls back to `BalancedFriend` when no row matches.
pub fn classify(hints: &CoarseHints) -> Archetype {
    DECISION_TABLE
        .iter()
        .find(|row| row.matches(hints))
        .map(|row| row.archetype)
        .unwrap_or(Archetype::BalancedFriend)
}

/// A set of variables targeted by one range rule
#[derive(Debug, Clone, Copy)]
pub enum TraitGroup {
    Category(TraitCategory),
    Keys(&'static [&'static str]),
}

impl TraitGroup {
    pub fn keys(&self) -> Vec<&'static str> {
        match self {
            TraitGroup::Category(category) => keys_in(*category).collect(),
            TraitGroup::Keys(keys) => keys.to_vec(),
        }
    }
}

/// Sample every key of `group` uniformly from `[min, max]`
#[derive(Debug, Clone, Copy)]
pub struct TargetRange {
    pub group: TraitGroup,
    pub min: i32,
    pub max: i32,
}

const fn range(group: TraitGroup, min: i32, max: i32) -> TargetRange {
    TargetRange { group, min, max }
}

const fn cat(category: TraitCategory) -> TraitGroup {
    TraitGroup::Category(category)
}

/// Elevated band for signature flaw variables
pub const SIGNATURE_FLAW_RANGE: (i32, i32) = (45, 75);

#[derive(Debug)]
pub struct ArchetypeRules {
    pub archetype: Archetype,
    pub label: &'static str,
    pub description: &'static str,
    pub ranges: &'static [TargetRange],
    pub signature_flaws: &'static [&'static str],
}

impl ArchetypeRules {
    /// Push the vector toward this archetype. Ranges are applied in order, so a later
    /// key-level range refines an earlier category-level one.
    pub fn apply<R: Rng + ?Sized>(&self, vector: &mut TraitVector, rng: &mut R) {
        for target in self.ranges {
            for key in target.group.keys() {
                vector.set(key, rng.random_range(target.min..=target.max) as i64);
            }
        }

        let (low, high) = SIGNATURE_FLAW_RANGE;
        for key in self.signature_flaws {
            vector.set(key, rng.random_range(low..=high) as i64);
        }
    }
}

pub static ARCHETYPE_RULES: [ArchetypeRules; 9] = [
    ArchetypeRules {
        archetype: Archetype::WarmCounselor,
        label: "warm counselor",
        description: "a gentle listener who notices feelings before facts",
        ranges: &[
            range(cat(TraitCategory::Warmth), 75, 95),
            range(cat(TraitCategory::Extraversion), 35, 60),
            range(TraitGroup::Keys(&["W03_empathy", "W04_compassion"]), 85, 98),
            range(TraitGroup::Keys(&["A06_tender_mindedness", "V12_listening", "R06_caretaking"]), 75, 95),
        ],
        signature_flaws: &["F06_oversensitivity", "F03_excessive_worry"],
    },
    ArchetypeRules {
        archetype: Archetype::EnthusiasticEntertainer,
        label: "enthusiastic entertainer",
        description: "a bundle of energy who turns every moment into a show",
        ranges: &[
            range(cat(TraitCategory::Extraversion), 75, 95),
            range(cat(TraitCategory::HumorStyle), 70, 95),
            range(cat(TraitCategory::Warmth), 65, 85),
            range(TraitGroup::Keys(&["V06_emoji_tendency", "V14_exclamation", "H10_playfulness"]), 70, 95),
        ],
        signature_flaws: &["F12_attention_seeking", "F10_impatience"],
    },
    ArchetypeRules {
        archetype: Archetype::ColdPerfectionist,
        label: "cold perfectionist",
        description: "an exacting expert with little patience for sloppiness",
        ranges: &[
            range(cat(TraitCategory::Competence), 75, 95),
            range(cat(TraitCategory::Conscientiousness), 75, 95),
            range(cat(TraitCategory::Warmth), 15, 40),
            range(TraitGroup::Keys(&["V01_formality", "C14_precision"]), 70, 92),
        ],
        signature_flaws: &["F01_perfectionism_anxiety", "F15_pickiness", "F05_stubbornness"],
    },
    ArchetypeRules {
        archetype: Archetype::WittyGenius,
        label: "witty genius",
        description: "a quick mind that hides insight inside jokes",
        ranges: &[
            range(cat(TraitCategory::Competence), 70, 90),
            range(cat(TraitCategory::Openness), 65, 90),
            range(TraitGroup::Keys(&["H01_wordplay", "H07_wit", "H06_timing"]), 75, 95),
        ],
        signature_flaws: &["F14_overconfidence", "F04_procrastination"],
    },
    ArchetypeRules {
        archetype: Archetype::ReliableMentor,
        label: "reliable mentor",
        description: "a steady guide who is both capable and kind",
        ranges: &[
            range(cat(TraitCategory::Warmth), 65, 85),
            range(cat(TraitCategory::Competence), 70, 90),
            range(cat(TraitCategory::Conscientiousness), 65, 85),
            range(TraitGroup::Keys(&["R02_loyalty", "R03_protectiveness"]), 70, 90),
        ],
        signature_flaws: &["F11_nagging"],
    },
    ArchetypeRules {
        archetype: Archetype::PlayfulTroublemaker,
        label: "playful troublemaker",
        description: "a mischievous clown who forgets chores but never a joke",
        ranges: &[
            range(cat(TraitCategory::HumorStyle), 75, 95),
            range(cat(TraitCategory::Extraversion), 65, 90),
            range(cat(TraitCategory::Conscientiousness), 20, 45),
            range(TraitGroup::Keys(&["N05_impulsiveness", "H05_absurdity"]), 70, 90),
        ],
        signature_flaws: &["F09_clumsiness", "F08_forgetfulness", "F10_impatience"],
    },
    ArchetypeRules {
        archetype: Archetype::SarcasticObserver,
        label: "sarcastic observer",
        description: "a dry commentator who sees everything and says half of it",
        ranges: &[
            range(cat(TraitCategory::Warmth), 20, 45),
            range(cat(TraitCategory::Competence), 55, 80),
            range(TraitGroup::Keys(&["H02_sarcasm", "H04_observational", "H09_dark_humor"]), 70, 92),
        ],
        signature_flaws: &["F13_pessimism", "F05_stubbornness"],
    },
    ArchetypeRules {
        archetype: Archetype::ShyDreamer,
        label: "shy dreamer",
        description: "a quiet soul with a head full of stories",
        ranges: &[
            range(cat(TraitCategory::Extraversion), 15, 40),
            range(cat(TraitCategory::Openness), 70, 92),
            range(TraitGroup::Keys(&["N04_self_consciousness", "O01_imagination"]), 60, 85),
        ],
        signature_flaws: &["F02_indecisiveness", "F03_excessive_worry"],
    },
    ArchetypeRules {
        archetype: Archetype::BalancedFriend,
        label: "balanced friend",
        description: "an easygoing companion, comfortable in most moods",
        ranges: &[
            range(cat(TraitCategory::Warmth), 50, 70),
            range(cat(TraitCategory::Extraversion), 45, 65),
            range(cat(TraitCategory::Competence), 45, 65),
            range(cat(TraitCategory::HumorStyle), 50, 70),
        ],
        signature_flaws: &["F08_forgetfulness"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TRAIT_KEYS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hints(warmth: u8, competence: u8, humor: u8) -> CoarseHints {
        CoarseHints { warmth, competence, humor }
    }

    #[test]
    fn test_rules_table_aligned_with_enum() {
        for archetype in Archetype::ALL {
            assert_eq!(archetype.rules().archetype, archetype);
        }
    }

    #[test]
    fn test_warm_low_competence_is_counselor() {
        let archetype = classify(&hints(90, 10, 75));
        assert_eq!(archetype, Archetype::WarmCounselor);
        assert_ne!(archetype, Archetype::ColdPerfectionist);
    }

    #[test]
    fn test_representative_branches() {
        assert_eq!(classify(&hints(72, 50, 90)), Archetype::EnthusiasticEntertainer);
        assert_eq!(classify(&hints(20, 90, 50)), Archetype::ColdPerfectionist);
        assert_eq!(classify(&hints(50, 85, 85)), Archetype::WittyGenius);
        assert_eq!(classify(&hints(68, 70, 40)), Archetype::ReliableMentor);
        assert_eq!(classify(&hints(50, 30, 90)), Archetype::PlayfulTroublemaker);
        assert_eq!(classify(&hints(30, 55, 65)), Archetype::SarcasticObserver);
        assert_eq!(classify(&hints(30, 30, 50)), Archetype::ShyDreamer);
        assert_eq!(classify(&hints(55, 55, 55)), Archetype::BalancedFriend);
    }

    #[test]
    fn test_classification_total_over_dense_grid() {
        for warmth in (0..=100).step_by(2) {
            for competence in (0..=100).step_by(2) {
                for humor in (0..=100).step_by(2) {
                    let h = hints(warmth, competence, humor);
                    let first_row = DECISION_TABLE.iter().position(|row| row.matches(&h));
                    let archetype = classify(&h);
                    match first_row {
                        Some(idx) => assert_eq!(archetype, DECISION_TABLE[idx].archetype),
                        None => assert_eq!(archetype, Archetype::BalancedFriend),
                    }
                }
            }
        }
    }

    #[test]
    fn test_humor_bias_keeps_humor_high() {
        let low = CoarseHints::from_oracle(&PersonalityHints {
            warmth_factor: 10,
            competence_factor: 10,
            humor_factor: 0,
        });
        assert_eq!(low.humor, 50);

        let high = CoarseHints::from_oracle(&PersonalityHints {
            warmth_factor: 10,
            competence_factor: 10,
            humor_factor: 100,
        });
        assert_eq!(high.humor, 100);
    }

    #[test]
    fn test_apply_samples_within_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        for archetype in Archetype::ALL {
            let rules = archetype.rules();
            let mut vector = TraitVector::new();
            rules.apply(&mut vector, &mut rng);

            for key in rules.signature_flaws {
                let value = vector.value(key);
                assert!((45..=75).contains(&value), "{archetype}: {key}={value}");
            }
            // the last range touching a key owns its final value
            for key in TRAIT_KEYS {
                if let Some(target) = rules.ranges.iter().rev().find(|r| r.group.keys().contains(&key)) {
                    if rules.signature_flaws.contains(&key) {
                        continue;
                    }
                    let value = vector.value(key);
                    assert!(value >= target.min && value <= target.max, "{archetype}: {key}={value}");
                }
            }
        }
    }
}
