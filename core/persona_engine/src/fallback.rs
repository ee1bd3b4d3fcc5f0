//! Designated fallback values, one per external call site.

use shared_types::{ObjectAnalysis, TraitSummary};

/// Used when the image oracle fails outright or returns nothing parseable
pub fn default_analysis() -> ObjectAnalysis {
    ObjectAnalysis::default()
}

const WARM_APOLOGY: &str =
    "Oh no, I'm so sorry... my thoughts got all tangled for a second. Could you say that again?";
const PLAYFUL_APOLOGY: &str =
    "Oops, my brain just did a little somersault and forgot what it was doing! Try me again?";
const PLAIN_APOLOGY: &str = "Sorry, I couldn't put my thoughts together just now. Please try again.";

/// Reply used when the text oracle fails, times out, or answers with nothing.
pub fn canned_apology(summary: &TraitSummary) -> &'static str {
    if summary.warmth >= 70 {
        WARM_APOLOGY
    } else if summary.humor >= 70 {
        PLAYFUL_APOLOGY
    } else {
        PLAIN_APOLOGY
    }
}
