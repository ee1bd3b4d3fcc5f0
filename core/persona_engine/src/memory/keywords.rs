//! Keyword and sentiment tagging for conversation turns.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fallback tokens kept per message
const MAX_FALLBACK_TAGS: usize = 10;

pub const KEYWORD_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "emotion",
        &[
            "happy", "sad", "angry", "tired", "lonely", "excited", "worried", "stressed", "bored",
            "기쁘", "행복", "슬프", "화나", "피곤", "외로", "신나", "걱정", "스트레스", "심심",
        ],
    ),
    (
        "activity",
        &[
            "work", "study", "exercise", "workout", "game", "read", "cook", "clean", "shopping",
            "업무", "공부", "운동", "게임", "독서", "요리", "청소", "쇼핑",
        ],
    ),
    (
        "relationship",
        &[
            "friend", "family", "mom", "dad", "boyfriend", "girlfriend", "boss", "coworker",
            "친구", "가족", "엄마", "아빠", "남자친구", "여자친구", "상사", "동료",
        ],
    ),
    (
        "time",
        &[
            "today", "yesterday", "tomorrow", "morning", "night", "weekend",
            "오늘", "어제", "내일", "아침", "밤", "주말",
        ],
    ),
    (
        "place",
        &[
            "home", "office", "school", "cafe", "gym", "park",
            "집", "회사", "학교", "카페", "헬스장", "공원",
        ],
    ),
    (
        "hobby",
        &[
            "music", "movie", "drawing", "travel", "photo", "guitar", "piano",
            "음악", "영화", "그림", "여행", "사진", "기타", "피아노",
        ],
    ),
    (
        "food",
        &[
            "coffee", "tea", "pizza", "chicken", "ramen", "dinner", "lunch", "breakfast",
            "커피", "녹차", "피자", "치킨", "라면", "저녁", "점심", "아침밥",
        ],
    ),
    (
        "weather",
        &[
            "rain", "snow", "sunny", "cold", "hot", "weather",
            "비가", "눈이", "맑은", "추워", "더워", "날씨",
        ],
    ),
];

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "happy", "love", "thanks", "thank", "fun", "nice", "awesome", "glad",
    "좋", "행복", "사랑", "고마", "감사", "재밌", "재미", "신나", "최고",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "sad", "hate", "tired", "angry", "awful", "terrible", "lonely", "stressed", "worried",
    "싫", "슬프", "화나", "피곤", "힘들", "짜증", "외로", "우울", "걱정",
];

const STOPWORDS: &[&str] = &[
    "the", "and", "you", "your", "are", "was", "is", "it", "to", "of", "in", "on", "for", "me",
    "my", "so", "do", "be", "at", "a", "an", "that", "this", "what", "with",
];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

fn is_ascii_word(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Substring match, except short ASCII keywords must match a whole token ("tea" is not in "steam").
pub(crate) fn keyword_present(text: &str, tokens: &[String], keyword: &str) -> bool {
    if is_ascii_word(keyword) && keyword.len() <= 4 {
        tokens.iter().any(|t| t == keyword)
    } else {
        text.contains(keyword)
    }
}

pub(crate) fn tokenize(text: &str) -> Vec<String> {
    match Regex::new(r"[\p{L}\p{N}]{2,}") {
        Ok(re) => re.find_iter(text).map(|m| m.as_str().to_string()).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "token pattern failed to compile");
            Vec::new()
        }
    }
}

/// Table keywords found in `text`, then leftover word-like tokens, without duplicates.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens = tokenize(&lowered);
    let mut tags: Vec<String> = Vec::new();

    for (_, words) in KEYWORD_CATEGORIES {
        for word in words.iter() {
            if keyword_present(&lowered, &tokens, word) && !tags.iter().any(|t| t == word) {
                tags.push(word.to_string());
            }
        }
    }

    let mut fallback = 0;
    for token in tokens {
        if fallback >= MAX_FALLBACK_TAGS {
            break;
        }
        if STOPWORDS.contains(&token.as_str()) || tags.iter().any(|t| token.contains(t.as_str())) {
            continue;
        }
        tags.push(token);
        fallback += 1;
    }
    tags
}

/// Keyword-count comparison; ties are neutral.
pub fn detect_sentiment(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let tokens = tokenize(&lowered);
    let count = |words: &[&str]| {
        words
            .iter()
            .filter(|w| keyword_present(&lowered, &tokens, w))
            .count()
    };

    let positive = count(POSITIVE_WORDS);
    let negative = count(NEGATIVE_WORDS);
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}
