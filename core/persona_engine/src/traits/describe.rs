//! Text descriptions derived from a trait vector.

use super::vector::TraitVector;

const FLAW_TEXT: [(&str, &str); 15] = [
    ("F01_perfectionism_anxiety", "Gets anxious when things aren't perfect"),
    ("F02_indecisiveness", "Can't make up its mind, even about small things"),
    ("F03_excessive_worry", "Worries about things that will probably never happen"),
    ("F04_procrastination", "Puts things off until the last possible moment"),
    ("F05_stubbornness", "Refuses to back down once it has an opinion"),
    ("F06_oversensitivity", "Takes offhand comments far too personally"),
    ("F07_jealousy", "Gets jealous when you pay attention to other objects"),
    ("F08_forgetfulness", "Forgets what it was saying halfway through"),
    ("F09_clumsiness", "Clumsy, in spirit if not in body"),
    ("F10_impatience", "Hates waiting and lets you know it"),
    ("F11_nagging", "Repeats the same reminder over and over"),
    ("F12_attention_seeking", "Sulks when it isn't the center of attention"),
    ("F13_pessimism", "Expects the worst and says so out loud"),
    ("F14_overconfidence", "Overestimates what it can actually do"),
    ("F15_pickiness", "Fussy about how it is handled and where it is kept"),
];

const CONTRADICTION_TEXT: [(&str, &str); 10] = [
    ("P01_confident_outside_anxious_inside", "Acts confident but is secretly anxious"),
    ("P02_logical_yet_emotional", "Argues logically, then gets swept up in feelings"),
    ("P03_social_yet_lonely", "Loves company yet often feels lonely"),
    ("P04_independent_yet_clingy", "Claims independence but hates being left alone"),
    ("P05_calm_yet_explosive", "Usually calm, until it suddenly isn't"),
    ("P06_lazy_yet_perfectionist", "Lazy about starting, obsessive about finishing"),
    ("P07_tough_yet_soft", "Tough on the outside, soft on the inside"),
    ("P08_cynical_yet_hopeful", "Cynical in words, hopeful at heart"),
    ("P09_orderly_yet_chaotic", "Wants order but lives in cheerful chaos"),
    ("P10_humble_yet_proud", "Modest in words, quietly proud underneath"),
];

fn describe_top(vector: &TraitVector, prefix: &str, n: usize, table: &[(&str, &str)]) -> Vec<String> {
    vector
        .top(prefix, n)
        .into_iter()
        .filter_map(|(key, _)| table.iter().find(|(k, _)| *k == key).map(|(_, text)| text.to_string()))
        .collect()
}

/// The four strongest flaw tendencies, strongest first
pub fn flaw_descriptions(vector: &TraitVector) -> Vec<String> {
    describe_top(vector, "F", 4, &FLAW_TEXT)
}

/// The two strongest contradictions, strongest first
pub fn contradiction_descriptions(vector: &TraitVector) -> Vec<String> {
    describe_top(vector, "P", 2, &CONTRADICTION_TEXT)
}

/// Rule-based description of how the persona talks.
pub fn communication_style(vector: &TraitVector) -> String {
    let band = |key: &str, high: &'static str, low: &'static str, mid: &'static str| {
        let value = vector.value(key);
        if value >= 65 {
            high
        } else if value <= 35 {
            low
        } else {
            mid
        }
    };

    let mut parts = vec![
        band("V01_formality", "polite and formal", "casual and relaxed", "friendly but proper"),
        band("V02_verbosity", "talkative, with long answers", "brief and to the point", "moderately chatty"),
        band("V03_directness", "says exactly what it thinks", "hints rather than says", "honest but tactful"),
        band("V04_emotional_expression", "wears its feelings openly", "keeps its feelings to itself", "shows feelings now and then"),
    ];
    if vector.value("V06_emoji_tendency") >= 65 {
        parts.push("sprinkles in emoji");
    }
    if vector.value("V14_exclamation") >= 65 {
        parts.push("uses lots of exclamation marks");
    }

    let mut text = parts.join(", ");
    if let Some(first) = text.get(..1) {
        text = first.to_uppercase() + &text[1..];
    }
    text.push('.');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TRAIT_KEYS;

    #[test]
    fn test_description_tables_cover_catalog() {
        let flaws = TRAIT_KEYS.iter().filter(|k| k.starts_with('F')).count();
        let contradictions = TRAIT_KEYS.iter().filter(|k| k.starts_with('P')).count();
        assert_eq!(flaws, FLAW_TEXT.len());
        assert_eq!(contradictions, CONTRADICTION_TEXT.len());
        for (key, _) in FLAW_TEXT.iter().chain(CONTRADICTION_TEXT.iter()) {
            assert!(TRAIT_KEYS.contains(key));
        }
    }

    #[test]
    fn test_top_flaws_and_contradictions() {
        let mut vector = TraitVector::new();
        vector.set("F07_jealousy", 90);
        vector.set("F11_nagging", 70);
        vector.set("P07_tough_yet_soft", 80);

        let flaws = flaw_descriptions(&vector);
        assert_eq!(flaws.len(), 4);
        assert!(flaws[0].contains("jealous"));
        assert!(flaws[1].contains("reminder"));

        let contradictions = contradiction_descriptions(&vector);
        assert_eq!(contradictions.len(), 2);
        assert!(contradictions[0].starts_with("Tough"));
    }

    #[test]
    fn test_communication_style_bands() {
        let mut vector = TraitVector::new();
        vector.set("V01_formality", 20);
        vector.set("V02_verbosity", 90);
        vector.set("V14_exclamation", 80);

        let style = communication_style(&vector);
        assert!(style.starts_with("Casual and relaxed"));
        assert!(style.contains("talkative"));
        assert!(style.contains("exclamation"));
        assert!(style.ends_with('.'));
    }
}
