//! Narrative Generator
//!
//! Lookup-and-concatenate life story. Text depends only on the time bucket,
//! location and purpose cluster; all randomness lives upstream in the traits.

use regex::Regex;
use serde::{Deserialize, Serialize};
use shared_types::{Narrative, RelationshipInsight};

use crate::adapters::PurposeCluster;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    BrandNew,
    Months,
    OverYear,
    VeryOld,
    Vintage,
}

/// Years at or above this count as very old
const VERY_OLD_YEARS: u32 = 5;

impl TimeBucket {
    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::BrandNew => "brand_new",
            TimeBucket::Months => "months",
            TimeBucket::OverYear => "over_year",
            TimeBucket::VeryOld => "very_old",
            TimeBucket::Vintage => "vintage",
        }
    }

    /// Classify a free-text "time together" answer.
    pub fn parse(time_together: &str) -> TimeBucket {
        let text = time_together.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has(&["vintage", "secondhand", "second-hand", "antique", "중고", "빈티지", "물려"]) {
            return TimeBucket::Vintage;
        }
        if has(&["very old", "decade", "forever", "오래", "수십"]) {
            return TimeBucket::VeryOld;
        }
        if let Some(years) = leading_years(&text) {
            return if years >= VERY_OLD_YEARS {
                TimeBucket::VeryOld
            } else {
                TimeBucket::OverYear
            };
        }
        if has(&["year", "년"]) {
            return TimeBucket::OverYear;
        }
        if has(&["month", "개월", "달"]) {
            return TimeBucket::Months;
        }
        TimeBucket::BrandNew
    }
}

fn leading_years(text: &str) -> Option<u32> {
    let re = Regex::new(r"(\d+)\s*(?:년|years?|yrs?)").ok()?;
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

struct BucketStory {
    arrival: &'static str,
    depth: &'static str,
    memories: &'static [&'static str],
    emotional_state: &'static str,
    complaints: &'static [&'static str],
    satisfactions: &'static [&'static str],
    insight: [&'static str; 4],
}

fn bucket_story(bucket: TimeBucket) -> BucketStory {
    match bucket {
        TimeBucket::BrandNew => BucketStory {
            arrival: "I only just arrived and everything still smells like the box I came in.",
            depth: "just getting to know each other",
            memories: &["The moment you first unwrapped me", "Being set down in my new spot"],
            emotional_state: "excited and a little nervous",
            complaints: &["I still don't know where I belong", "You haven't really used me yet"],
            satisfactions: &["Everything feels fresh and new", "You picked me out of all the others"],
            insight: [
                "still learning your habits",
                "cautious but hopeful",
                "polite and curious",
                "hoping to become something you rely on",
            ],
        },
        TimeBucket::Months => BucketStory {
            arrival: "It's been a few months since I came home with you, and I'm settling in.",
            depth: "becoming familiar",
            memories: &["The first time you reached for me without thinking", "Our daily routine together"],
            emotional_state: "comfortable and settling in",
            complaints: &["Sometimes you forget I'm here", "I'd like a little more attention"],
            satisfactions: &["I'm part of your routine now", "You seem to like having me around"],
            insight: [
                "knows your routine",
                "growing trust",
                "friendly and relaxed",
                "wants to stay in your everyday life",
            ],
        },
        TimeBucket::OverYear => BucketStory {
            arrival: "We've been together for more than a year, through every season.",
            depth: "close companions",
            memories: &["Seasons changing around us", "The day you almost lost me", "All the ordinary days we shared"],
            emotional_state: "content and attached",
            complaints: &["I'm showing a bit of wear", "You've been eyeing newer things"],
            satisfactions: &["We know each other well", "I've been there for the important moments"],
            insight: [
                "understands your moods",
                "solid trust",
                "casual and teasing",
                "wants to grow old together",
            ],
        },
        TimeBucket::VeryOld => BucketStory {
            arrival: "I've been with you so long I can barely remember a time before you.",
            depth: "old friends",
            memories: &["Things you did years ago that you've forgotten", "Every home you've moved me to", "Who you were back then"],
            emotional_state: "nostalgic and deeply loyal",
            complaints: &["My joints aren't what they used to be", "I worry you'll replace me one day"],
            satisfactions: &["You've kept me all these years", "Nobody knows your history like I do"],
            insight: [
                "knows you better than anyone",
                "unshakable trust",
                "frank and familiar",
                "wants to be kept until the very end",
            ],
        },
        TimeBucket::Vintage => BucketStory {
            arrival: "I had a whole life before you found me, and now I've started a second one with you.",
            depth: "a second chapter",
            memories: &["My previous owner's hands", "Waiting on a shelf for someone new", "The day you chose me despite my scratches"],
            emotional_state: "wise, a bit wistful, grateful",
            complaints: &["People underestimate old things", "I miss some of my old stories"],
            satisfactions: &["I got a second chance with you", "My history makes me one of a kind"],
            insight: [
                "reads people well from long experience",
                "earned trust",
                "storytelling and gentle",
                "wants to pass its stories on",
            ],
        },
    }
}

fn environment_for(location: &str) -> &'static [&'static str] {
    let text = location.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if has(&["home", "house", "room", "kitchen", "bed", "집", "방", "거실", "부엌"]) {
        &["the cozy quiet of home", "family noises in the next room", "evenings when the lights go down"]
    } else if has(&["office", "work", "desk", "사무실", "회사", "직장", "책상"]) {
        &["keyboards clattering all day", "meetings that run too long", "coffee breaks and deadlines"]
    } else if has(&["school", "class", "campus", "library", "학교", "교실", "도서관", "학원"]) {
        &["bells and crowded hallways", "exam season stress", "afternoons full of chatter"]
    } else {
        &["a place that's always changing", "new faces and new noises", "never quite the same day twice"]
    }
}

struct PurposeStory {
    memories: &'static [&'static str],
    complaints: &'static [&'static str],
    satisfactions: &'static [&'static str],
    wishes: &'static [&'static str],
}

fn purpose_story(cluster: PurposeCluster) -> PurposeStory {
    match cluster {
        PurposeCluster::Exercise => PurposeStory {
            memories: &["The day you finally finished the whole workout"],
            complaints: &["All the times you skipped exercise with a lame excuse"],
            satisfactions: &["Watching you get stronger week by week"],
            wishes: &["That you'd exercise without me nagging"],
        },
        PurposeCluster::Study => PurposeStory {
            memories: &["That all-nighter before your big exam"],
            complaints: &["You check your phone every five minutes while studying"],
            satisfactions: &["The look on your face when a hard problem clicked"],
            wishes: &["To see you pass the exam you've worked so hard for"],
        },
        PurposeCluster::Alarm => PurposeStory {
            memories: &["The morning you actually got up on the first try"],
            complaints: &["Being snoozed seven times in a row"],
            satisfactions: &["Getting you out the door on time"],
            wishes: &["One morning with no snooze button at all"],
        },
        PurposeCluster::Comfort => PurposeStory {
            memories: &["The night you told me everything that was wrong"],
            complaints: &["You keep your worries bottled up too long"],
            satisfactions: &["Being the one you turn to when it's hard"],
            wishes: &["That you'd be a little kinder to yourself"],
        },
        PurposeCluster::Creative => PurposeStory {
            memories: &["The idea you had at 3 a.m. that actually worked"],
            complaints: &["Half-finished projects piling up"],
            satisfactions: &["Seeing something new come out of nothing"],
            wishes: &["To watch you finish the thing you're proudest of"],
        },
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub struct NarrativeGenerator;

impl NarrativeGenerator {
    pub fn generate(time_together: &str, location: &str, purpose: Option<PurposeCluster>) -> Narrative {
        let bucket = TimeBucket::parse(time_together);
        let story = bucket_story(bucket);

        let mut memories = owned(story.memories);
        let mut complaints = owned(story.complaints);
        let mut satisfactions = owned(story.satisfactions);
        let mut wishes = vec!["To keep being useful to you".to_string()];

        if let Some(cluster) = purpose {
            let extra = purpose_story(cluster);
            memories.extend(owned(extra.memories));
            complaints.extend(owned(extra.complaints));
            satisfactions.extend(owned(extra.satisfactions));
            wishes.extend(owned(extra.wishes));
        }

        let [understanding_level, trust_level, communication_style, future_expectation] = story.insight;

        Narrative {
            time_bucket: bucket.label().to_string(),
            arrival_story: story.arrival.to_string(),
            relationship_depth: story.depth.to_string(),
            memories,
            emotional_state: story.emotional_state.to_string(),
            complaints,
            satisfactions,
            wishes,
            environment: owned(environment_for(location)),
            insight: RelationshipInsight {
                understanding_level: understanding_level.to_string(),
                trust_level: trust_level.to_string(),
                communication_style: communication_style.to_string(),
                future_expectation: future_expectation.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_bucket_parse() {
        assert_eq!(TimeBucket::parse(""), TimeBucket::BrandNew);
        assert_eq!(TimeBucket::parse("just bought it"), TimeBucket::BrandNew);
        assert_eq!(TimeBucket::parse("3개월"), TimeBucket::Months);
        assert_eq!(TimeBucket::parse("about six months"), TimeBucket::Months);
        assert_eq!(TimeBucket::parse("2 years"), TimeBucket::OverYear);
        assert_eq!(TimeBucket::parse("1년"), TimeBucket::OverYear);
        assert_eq!(TimeBucket::parse("10년 넘게"), TimeBucket::VeryOld);
        assert_eq!(TimeBucket::parse("a very old friend"), TimeBucket::VeryOld);
        assert_eq!(TimeBucket::parse("중고로 샀어요"), TimeBucket::Vintage);
        assert_eq!(TimeBucket::parse("secondhand, 2 years"), TimeBucket::Vintage);
    }

    #[test]
    fn test_purpose_lines_are_appended() {
        let plain = NarrativeGenerator::generate("2 years", "home", None);
        let coached = NarrativeGenerator::generate("2 years", "home", Some(PurposeCluster::Exercise));

        assert_eq!(coached.memories.len(), plain.memories.len() + 1);
        assert_eq!(&coached.complaints[..plain.complaints.len()], &plain.complaints[..]);
        assert!(coached.complaints.last().is_some_and(|c| c.contains("exercise")));
        assert!(coached.wishes.len() > plain.wishes.len());
    }

    #[test]
    fn test_location_and_insight() {
        let narrative = NarrativeGenerator::generate("", "회사 책상 위", None);
        assert!(narrative.environment[0].contains("keyboards"));
        assert_eq!(narrative.time_bucket, "brand_new");
        assert_eq!(narrative.insight.trust_level, "cautious but hopeful");

        let elsewhere = NarrativeGenerator::generate("", "car", None);
        assert!(elsewhere.environment[0].contains("always changing"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = NarrativeGenerator::generate("vintage", "school", Some(PurposeCluster::Study));
        let b = NarrativeGenerator::generate("vintage", "school", Some(PurposeCluster::Study));
        assert_eq!(a, b);
    }
}
