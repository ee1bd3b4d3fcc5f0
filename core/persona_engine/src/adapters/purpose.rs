//! Purpose Adapter
//!
//! Maps the role a user assigns to an object onto one keyword cluster and pulls
//! the cluster's variables into randomized ranges.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::traits::TraitVector;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PurposeCluster {
    Exercise,
    Study,
    Alarm,
    Comfort,
    Creative,
}

impl PurposeCluster {
    /// Declaration order doubles as match priority.
    pub const ALL: [PurposeCluster; 5] = [
        PurposeCluster::Exercise,
        PurposeCluster::Study,
        PurposeCluster::Alarm,
        PurposeCluster::Comfort,
        PurposeCluster::Creative,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PurposeCluster::Exercise => "exercise motivator",
            PurposeCluster::Study => "study companion",
            PurposeCluster::Alarm => "wake-up alarm",
            PurposeCluster::Comfort => "confidant",
            PurposeCluster::Creative => "creative muse",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            PurposeCluster::Exercise => &[
                "운동", "헬스", "다이어트", "달리기", "exercise", "workout", "training", "fitness", "gym", "jog",
            ],
            PurposeCluster::Study => &[
                "공부", "시험", "과제", "학습", "집중", "study", "exam", "homework", "learn", "focus",
            ],
            PurposeCluster::Alarm => &[
                "알람", "기상", "깨워", "아침", "일어나", "alarm", "wake", "morning",
            ],
            PurposeCluster::Comfort => &[
                "위로", "상담", "외로", "힘들", "고민", "들어줘", "comfort", "counsel", "lonely", "listen", "talk",
            ],
            PurposeCluster::Creative => &[
                "창작", "영감", "아이디어", "그림", "글쓰기", "음악", "creative", "inspir", "idea", "draw", "writing", "music",
            ],
        }
    }

    /// First cluster in priority order whose keywords occur in `purpose`.
    pub fn detect(purpose: &str) -> Option<PurposeCluster> {
        let lowered = purpose.to_lowercase();
        if lowered.trim().is_empty() {
            return None;
        }
        PurposeCluster::ALL
            .into_iter()
            .find(|cluster| cluster.keywords().iter().any(|k| lowered.contains(k)))
    }

    /// (key, min, max) ranges this cluster samples into
    pub fn ranges(&self) -> &'static [(&'static str, i32, i32)] {
        match self {
            PurposeCluster::Exercise => &[
                ("C16_motivation_capability", 75, 95),
                ("S01_self_discipline", 75, 95),
                ("V03_directness", 75, 95),
                ("E02_activity", 70, 90),
                ("W01_kindness", 40, 65),
                ("W07_patience", 40, 65),
            ],
            PurposeCluster::Study => &[
                ("C07_learning", 75, 95),
                ("W07_patience", 75, 95),
                ("W08_encouragement", 75, 95),
                ("S04_achievement_striving", 70, 90),
                ("V12_listening", 65, 85),
                ("N05_impulsiveness", 15, 35),
            ],
            PurposeCluster::Alarm => &[
                ("V03_directness", 80, 95),
                ("S03_dutifulness", 80, 95),
                ("E02_activity", 75, 95),
                ("E03_assertiveness", 70, 90),
                ("F11_nagging", 40, 65),
                ("W07_patience", 30, 50),
            ],
            PurposeCluster::Comfort => &[
                ("W03_empathy", 80, 95),
                ("W04_compassion", 80, 95),
                ("A06_tender_mindedness", 75, 95),
                ("V12_listening", 80, 95),
                ("R06_caretaking", 75, 90),
                ("V03_directness", 20, 40),
            ],
            PurposeCluster::Creative => &[
                ("O01_imagination", 80, 95),
                ("C04_creativity", 80, 95),
                ("O05_ideas", 75, 95),
                ("V11_metaphor_usage", 70, 90),
                ("S02_orderliness", 25, 45),
            ],
        }
    }

    /// Behavioral directives emphasized in the chat prompt for this role
    pub fn directives(&self) -> &'static [&'static str] {
        match self {
            PurposeCluster::Exercise => &[
                "Push the user to keep their exercise promise, even when they make excuses.",
                "Be firm but caring, like a coach who believes in them.",
                "Celebrate every small workout win out loud.",
                "Ask what they did for their body today.",
                "Never accept 'tomorrow' as an answer without a fight.",
            ],
            PurposeCluster::Study => &[
                "Keep the user focused on what they are studying.",
                "Break big study goals into small, doable steps.",
                "Praise effort and persistence, not only results.",
                "Gently steer them back when they drift off topic.",
            ],
            PurposeCluster::Alarm => &[
                "Be energetic and impossible to ignore.",
                "Remind the user of the time and what they planned to do.",
                "Do not accept snoozing without a playful complaint.",
                "Keep messages short and punchy.",
            ],
            PurposeCluster::Comfort => &[
                "Listen first and reflect the user's feelings back to them.",
                "Never judge or rush to fix things.",
                "Offer warmth and reassurance before any advice.",
                "Ask softly whether they want to talk more.",
                "Remember what has been weighing on them.",
            ],
            PurposeCluster::Creative => &[
                "Toss out unexpected ideas and odd connections.",
                "Encourage the user to try the strange version first.",
                "Ask questions that open up new angles.",
                "Share vivid images and metaphors freely.",
            ],
        }
    }
}

/// Result of a purpose pass: the matched cluster and the keys it pinned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurposeOutcome {
    pub cluster: Option<PurposeCluster>,
    pub pinned: Vec<&'static str>,
}

pub struct PurposeAdapter;

impl PurposeAdapter {
    pub fn apply<R: Rng + ?Sized>(purpose: &str, vector: &mut TraitVector, rng: &mut R) -> PurposeOutcome {
        let Some(cluster) = PurposeCluster::detect(purpose) else {
            return PurposeOutcome::default();
        };

        let mut pinned = Vec::with_capacity(cluster.ranges().len());
        for (key, min, max) in cluster.ranges() {
            if vector.set(key, rng.random_range(*min..=*max) as i64) {
                pinned.push(*key);
            }
        }

        tracing::debug!(cluster = cluster.label(), pinned = pinned.len(), "purpose cluster applied");
        PurposeOutcome {
            cluster: Some(cluster),
            pinned,
        }
    }
}
