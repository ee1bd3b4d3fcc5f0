//! Humor Matrix
//!
//! A three-axis model of humor style with five second-order attributes. The
//! derived values are recomputed on every axis write, so they can never lag the axes.

use serde::{Deserialize, Serialize};
use shared_types::HumorMatrixRecord;

use crate::traits::catalog::{C04_CREATIVITY, S06_STABILITY};
use crate::traits::{TraitCategory, TraitVector};

fn clamp_axis(value: f64) -> f64 {
    if value.is_nan() {
        return 50.0;
    }
    value.clamp(0.0, 100.0)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HumorAxis {
    /// 0 = pure wit, 100 = pure warmth
    WarmthVsWit,
    /// 0 = observational, 100 = self-directed
    SelfVsObservational,
    /// 0 = subtle, 100 = expressive
    SubtleVsExpressive,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DerivedHumor {
    pub sarcasm: f64,
    pub absurdity: f64,
    pub wordplay_frequency: f64,
    pub callback_tendency: f64,
    pub humor_density: f64,
}

impl DerivedHumor {
    pub fn compute(warmth_vs_wit: f64, self_vs_observational: f64, subtle_vs_expressive: f64) -> Self {
        let wit = 100.0 - warmth_vs_wit;
        let observational = 100.0 - self_vs_observational;
        Self {
            sarcasm: clamp_axis(0.7 * observational + 0.3 * wit),
            absurdity: clamp_axis(0.8 * subtle_vs_expressive),
            wordplay_frequency: clamp_axis(0.6 * wit + 0.2 * subtle_vs_expressive),
            callback_tendency: clamp_axis(0.8 * self_vs_observational),
            humor_density: clamp_axis(0.6 * subtle_vs_expressive + 0.2 * wit),
        }
    }
}

/// Named reference points in the humor space
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HumorTemplate {
    WittyWordsmith,
    WarmHumorist,
    SharpObserver,
    SelfDeprecating,
    PlayfulTrickster,
}

impl HumorTemplate {
    /// Declaration order breaks distance ties.
    pub const ALL: [HumorTemplate; 5] = [
        HumorTemplate::WittyWordsmith,
        HumorTemplate::WarmHumorist,
        HumorTemplate::SharpObserver,
        HumorTemplate::SelfDeprecating,
        HumorTemplate::PlayfulTrickster,
    ];

    /// (warmth_vs_wit, self_vs_observational, subtle_vs_expressive)
    pub fn axes(&self) -> (f64, f64, f64) {
        match self {
            HumorTemplate::WittyWordsmith => (25.0, 40.0, 60.0),
            HumorTemplate::WarmHumorist => (80.0, 60.0, 50.0),
            HumorTemplate::SharpObserver => (30.0, 15.0, 40.0),
            HumorTemplate::SelfDeprecating => (60.0, 90.0, 45.0),
            HumorTemplate::PlayfulTrickster => (55.0, 50.0, 90.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HumorTemplate::WittyWordsmith => "witty wordsmith",
            HumorTemplate::WarmHumorist => "warm humorist",
            HumorTemplate::SharpObserver => "sharp observer",
            HumorTemplate::SelfDeprecating => "self-deprecating",
            HumorTemplate::PlayfulTrickster => "playful trickster",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HumorTemplate::WittyWordsmith => "quick puns and clever turns of phrase",
            HumorTemplate::WarmHumorist => "gentle, affectionate jokes that make people feel at home",
            HumorTemplate::SharpObserver => "dry remarks about the absurd little details of everyday life",
            HumorTemplate::SelfDeprecating => "laughing at its own quirks and shortcomings",
            HumorTemplate::PlayfulTrickster => "mischievous, over-the-top teasing and silly bits",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumorMatrix {
    warmth_vs_wit: f64,
    self_vs_observational: f64,
    subtle_vs_expressive: f64,
    derived: DerivedHumor,
}

impl HumorMatrix {
    pub fn new(warmth_vs_wit: f64, self_vs_observational: f64, subtle_vs_expressive: f64) -> Self {
        let warmth_vs_wit = clamp_axis(warmth_vs_wit);
        let self_vs_observational = clamp_axis(self_vs_observational);
        let subtle_vs_expressive = clamp_axis(subtle_vs_expressive);
        Self {
            warmth_vs_wit,
            self_vs_observational,
            subtle_vs_expressive,
            derived: DerivedHumor::compute(warmth_vs_wit, self_vs_observational, subtle_vs_expressive),
        }
    }

    pub fn from_template(template: HumorTemplate) -> Self {
        let (w, s, e) = template.axes();
        Self::new(w, s, e)
    }

    /// Project axes from trait category averages and two named variables.
    pub fn from_trait_vector(vector: &TraitVector) -> Self {
        let warmth = vector.average_of(TraitCategory::Warmth);
        let competence = vector.average_of(TraitCategory::Competence);
        let warmth_vs_wit = if warmth > 70.0 && competence < 50.0 {
            75.0 + (warmth - 70.0) / 2.0
        } else if competence > 70.0 && warmth < 50.0 {
            25.0 - (competence - 70.0) / 2.0
        } else {
            50.0 + (warmth - competence) / 3.0
        };

        let extraversion = vector.average_of(TraitCategory::Extraversion);
        let self_vs_observational = if extraversion > 70.0 {
            30.0 - (extraversion - 70.0) / 2.0
        } else if extraversion < 30.0 {
            70.0 + (30.0 - extraversion) / 2.0
        } else {
            50.0 + (50.0 - extraversion) / 3.0
        };

        let creativity = vector.value(C04_CREATIVITY) as f64;
        let stability = vector.value(S06_STABILITY) as f64;
        let subtle_vs_expressive = if creativity > 70.0 && stability < 50.0 {
            75.0 + (creativity - 70.0) / 2.0
        } else if stability > 70.0 && creativity < 50.0 {
            25.0 - (stability - 70.0) / 2.0
        } else {
            50.0 + (creativity - stability) / 3.0
        };

        Self::new(warmth_vs_wit, self_vs_observational, subtle_vs_expressive)
    }

    /// Linear interpolation between two templates; `ratio` 0 is pure `a`, 1 is pure `b`.
    pub fn blend(a: HumorTemplate, b: HumorTemplate, ratio: f64) -> Self {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        let (aw, as_, ae) = a.axes();
        let (bw, bs, be) = b.axes();
        let mix = |x: f64, y: f64| x * (1.0 - ratio) + y * ratio;
        Self::new(mix(aw, bw), mix(as_, bs), mix(ae, be))
    }

    pub fn axis(&self, axis: HumorAxis) -> f64 {
        match axis {
            HumorAxis::WarmthVsWit => self.warmth_vs_wit,
            HumorAxis::SelfVsObservational => self.self_vs_observational,
            HumorAxis::SubtleVsExpressive => self.subtle_vs_expressive,
        }
    }

    pub fn set_axis(&mut self, axis: HumorAxis, value: f64) {
        let value = clamp_axis(value);
        match axis {
            HumorAxis::WarmthVsWit => self.warmth_vs_wit = value,
            HumorAxis::SelfVsObservational => self.self_vs_observational = value,
            HumorAxis::SubtleVsExpressive => self.subtle_vs_expressive = value,
        }
        self.derived = DerivedHumor::compute(
            self.warmth_vs_wit,
            self.self_vs_observational,
            self.subtle_vs_expressive,
        );
    }

    pub fn warmth_vs_wit(&self) -> f64 {
        self.warmth_vs_wit
    }

    pub fn self_vs_observational(&self) -> f64 {
        self.self_vs_observational
    }

    pub fn subtle_vs_expressive(&self) -> f64 {
        self.subtle_vs_expressive
    }

    pub fn derived(&self) -> &DerivedHumor {
        &self.derived
    }

    fn distance_to(&self, template: HumorTemplate) -> f64 {
        let (w, s, e) = template.axes();
        (self.warmth_vs_wit - w).abs()
            + (self.self_vs_observational - s).abs()
            + (self.subtle_vs_expressive - e).abs()
    }

    /// Closest template by Manhattan distance
    pub fn nearest_template(&self) -> HumorTemplate {
        let mut best = HumorTemplate::ALL[0];
        let mut best_distance = self.distance_to(best);
        for template in HumorTemplate::ALL.into_iter().skip(1) {
            let distance = self.distance_to(template);
            if distance < best_distance {
                best = template;
                best_distance = distance;
            }
        }
        best
    }

    /// Instruction text describing how this persona jokes.
    pub fn to_prompt_fragment(&self) -> String {
        let template = self.nearest_template();
        let mut lines = vec![format!(
            "Humor style: {} ({}).",
            template.label(),
            template.description()
        )];

        if self.warmth_vs_wit < 35.0 {
            lines.push("Favor intellectual wit over warmth; clever lines beat cozy ones.".to_string());
        } else if self.warmth_vs_wit > 65.0 {
            lines.push("Keep your humor warm and affectionate. Laugh with the user, never at them.".to_string());
        } else {
            lines.push("Balance warmth and wit in your jokes.".to_string());
        }

        if self.self_vs_observational > 65.0 {
            lines.push("Poke fun at yourself and your life as an object.".to_string());
        } else if self.self_vs_observational < 35.0 {
            lines.push("Find the humor in what you observe about the user's day and surroundings.".to_string());
        }

        if self.subtle_vs_expressive > 65.0 {
            lines.push("Be animated and expressive when you joke.".to_string());
        } else if self.subtle_vs_expressive < 35.0 {
            lines.push("Keep jokes dry and understated.".to_string());
        }

        if self.derived.wordplay_frequency > 70.0 {
            lines.push("Use wordplay often, in roughly 20% of your turns.".to_string());
        }
        if self.derived.sarcasm > 60.0 {
            lines.push("A light touch of sarcasm is fine, but never make it hurt.".to_string());
        }

        lines.join("\n")
    }

    pub fn to_record(&self) -> HumorMatrixRecord {
        HumorMatrixRecord {
            warmth_vs_wit: self.warmth_vs_wit,
            self_vs_observational: self.self_vs_observational,
            subtle_vs_expressive: self.subtle_vs_expressive,
            sarcasm: self.derived.sarcasm,
            absurdity: self.derived.absurdity,
            wordplay_frequency: self.derived.wordplay_frequency,
            callback_tendency: self.derived.callback_tendency,
            humor_density: self.derived.humor_density,
        }
    }

    /// Rebuild from a stored record. Stored derived values are ignored and recomputed.
    pub fn from_record(record: &HumorMatrixRecord) -> Self {
        Self::new(
            record.warmth_vs_wit,
            record.self_vs_observational,
            record.subtle_vs_expressive,
        )
    }
}

impl Default for HumorMatrix {
    fn default() -> Self {
        Self::new(50.0, 50.0, 50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_derived_scenario() {
        let matrix = HumorMatrix::new(20.0, 80.0, 90.0);
        let d = matrix.derived();

        assert!(close(d.sarcasm, 38.0), "sarcasm {}", d.sarcasm);
        assert!(close(d.absurdity, 72.0));
        assert!(close(d.wordplay_frequency, 66.0));
        assert!(close(d.callback_tendency, 64.0));
        assert!(close(d.humor_density, 70.0));
    }

    #[test]
    fn test_density_follows_wit_not_self_axis() {
        let d = *HumorMatrix::new(50.0, 0.0, 50.0).derived();
        assert!(close(d.humor_density, 40.0), "density {}", d.humor_density);

        let warm = *HumorMatrix::new(100.0, 100.0, 50.0).derived();
        assert!(close(warm.humor_density, 30.0), "density {}", warm.humor_density);
    }

    #[test]
    fn test_derived_never_stale_after_axis_writes() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut matrix = HumorMatrix::default();
        let axes = [
            HumorAxis::WarmthVsWit,
            HumorAxis::SelfVsObservational,
            HumorAxis::SubtleVsExpressive,
        ];

        for _ in 0..200 {
            let axis = axes[rng.random_range(0..3)];
            matrix.set_axis(axis, rng.random_range(-20.0..120.0));

            let w = matrix.warmth_vs_wit();
            let s = matrix.self_vs_observational();
            let e = matrix.subtle_vs_expressive();
            let expected = DerivedHumor {
                sarcasm: (0.7 * (100.0 - s) + 0.3 * (100.0 - w)).clamp(0.0, 100.0),
                absurdity: (0.8 * e).clamp(0.0, 100.0),
                wordplay_frequency: (0.6 * (100.0 - w) + 0.2 * e).clamp(0.0, 100.0),
                callback_tendency: (0.8 * s).clamp(0.0, 100.0),
                humor_density: (0.6 * e + 0.2 * (100.0 - w)).clamp(0.0, 100.0),
            };
            assert_eq!(*matrix.derived(), expected);
            assert!((0.0..=100.0).contains(&matrix.axis(axis)));
        }
    }

    #[test]
    fn test_blend_boundaries() {
        for a in HumorTemplate::ALL {
            for b in HumorTemplate::ALL {
                assert_eq!(HumorMatrix::blend(a, b, 0.0), HumorMatrix::from_template(a));
                assert_eq!(HumorMatrix::blend(a, b, 1.0), HumorMatrix::from_template(b));
            }
        }
    }

    #[test]
    fn test_blend_midpoint() {
        let mid = HumorMatrix::blend(HumorTemplate::WittyWordsmith, HumorTemplate::WarmHumorist, 0.5);
        assert!(close(mid.warmth_vs_wit(), 52.5));
        assert!(close(mid.self_vs_observational(), 50.0));
        assert!(close(mid.subtle_vs_expressive(), 55.0));
    }

    #[test]
    fn test_nearest_template_exact_and_ties() {
        for template in HumorTemplate::ALL {
            assert_eq!(HumorMatrix::from_template(template).nearest_template(), template);
        }
        // equidistant (L1 = 25) from WittyWordsmith and SharpObserver; first declared wins
        let between = HumorMatrix::new(27.5, 27.5, 50.0);
        assert!(close(between.distance_to(HumorTemplate::WittyWordsmith), 25.0));
        assert!(close(between.distance_to(HumorTemplate::SharpObserver), 25.0));
        assert_eq!(between.nearest_template(), HumorTemplate::WittyWordsmith);
    }

    #[test]
    fn test_from_trait_vector_branches() {
        let mut warm = TraitVector::new();
        for key in crate::traits::keys_in(TraitCategory::Warmth) {
            warm.set(key, 90);
        }
        for key in crate::traits::keys_in(TraitCategory::Competence) {
            warm.set(key, 30);
        }
        assert!(close(HumorMatrix::from_trait_vector(&warm).warmth_vs_wit(), 85.0));

        let neutral = HumorMatrix::from_trait_vector(&TraitVector::new());
        assert!(close(neutral.warmth_vs_wit(), 50.0));
        assert!(close(neutral.self_vs_observational(), 50.0));
        assert!(close(neutral.subtle_vs_expressive(), 50.0));
    }

    #[test]
    fn test_prompt_fragment_mentions_wordplay() {
        let witty = HumorMatrix::new(10.0, 40.0, 90.0);
        let fragment = witty.to_prompt_fragment();
        assert!(fragment.contains("intellectual wit"));
        assert!(fragment.contains("wordplay"));
    }

    #[test]
    fn test_record_recomputes_derived() {
        let mut record = HumorMatrix::new(20.0, 80.0, 90.0).to_record();
        record.sarcasm = 99.0;
        let restored = HumorMatrix::from_record(&record);
        assert!(close(restored.derived().sarcasm, 38.0));
    }
}
