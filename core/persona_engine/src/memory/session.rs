//! Per-session turn log, keyword table and rolling user profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::keywords::{detect_sentiment, extract_keywords, Sentiment};

/// Turns scanned for keyword overlap
pub const DEFAULT_MEMORY_WINDOW: usize = 20;
/// Overlapping turns returned by a context lookup
pub const MAX_RELEVANT_TURNS: usize = 3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Turn {
    pub timestamp: String,
    pub user_text: String,
    pub response_text: String,
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
}

impl Turn {
    fn shares_keyword(&self, keywords: &[String]) -> bool {
        self.keywords.iter().any(|k| keywords.contains(k))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStage {
    FirstMeeting,
    GettingAcquainted,
    BecomingFamiliar,
    CloseRelationship,
}

impl RelationshipStage {
    pub fn from_count(count: u64) -> Self {
        match count {
            0..=3 => RelationshipStage::FirstMeeting,
            4..=10 => RelationshipStage::GettingAcquainted,
            11..=20 => RelationshipStage::BecomingFamiliar,
            _ => RelationshipStage::CloseRelationship,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelationshipStage::FirstMeeting => "first meeting",
            RelationshipStage::GettingAcquainted => "getting acquainted",
            RelationshipStage::BecomingFamiliar => "becoming familiar",
            RelationshipStage::CloseRelationship => "close relationship",
        }
    }
}

fn style_for_length(average_length: f64) -> &'static str {
    if average_length < 15.0 {
        "short and casual"
    } else if average_length < 50.0 {
        "conversational"
    } else {
        "detailed and expressive"
    }
}

/// Rolling summary of how this user talks
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub message_count: u64,
    /// Mean user message length in characters
    pub average_length: f64,
    pub communication_style: String,
    pub relationship_stage: RelationshipStage,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            message_count: 0,
            average_length: 0.0,
            communication_style: style_for_length(0.0).to_string(),
            relationship_stage: RelationshipStage::FirstMeeting,
        }
    }
}

impl UserProfile {
    fn record_message(&mut self, length: usize) {
        self.message_count += 1;
        self.average_length += (length as f64 - self.average_length) / self.message_count as f64;
        self.communication_style = style_for_length(self.average_length).to_string();
        self.relationship_stage = RelationshipStage::from_count(self.message_count);
    }
}

/// What the prompt synthesizer gets to see of a session
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MemoryContext {
    /// Older turns sharing keywords with the current message, most recent first
    pub relevant: Vec<Turn>,
    /// Last turns in chronological order
    pub recent: Vec<Turn>,
    pub profile: Option<UserProfile>,
}

/// Serializable form of a session. Only turns are stored; everything else is replayed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Clone)]
pub struct SessionMemory {
    session_id: String,
    turns: Vec<Turn>,
    keyword_counts: BTreeMap<String, u64>,
    profile: UserProfile,
    memory_window: usize,
}

impl SessionMemory {
    pub fn new(session_id: &str, memory_window: usize) -> Self {
        Self {
            session_id: session_id.to_string(),
            turns: Vec::new(),
            keyword_counts: BTreeMap::new(),
            profile: UserProfile::default(),
            memory_window: memory_window.max(1),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn keyword_counts(&self) -> &BTreeMap<String, u64> {
        &self.keyword_counts
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn add_turn(&mut self, user_text: &str, response_text: &str) -> &Turn {
        let turn = Turn {
            timestamp: chrono::Utc::now().to_rfc3339(),
            user_text: user_text.to_string(),
            response_text: response_text.to_string(),
            keywords: extract_keywords(user_text),
            sentiment: detect_sentiment(user_text),
        };
        self.push(turn)
    }

    fn push(&mut self, turn: Turn) -> &Turn {
        for keyword in &turn.keywords {
            *self.keyword_counts.entry(keyword.clone()).or_insert(0) += 1;
        }
        self.profile.record_message(turn.user_text.chars().count());
        tracing::debug!(
            session = %self.session_id,
            count = self.profile.message_count,
            stage = self.profile.relationship_stage.label(),
            "turn recorded"
        );
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn relevant_context(&self, current_message: &str, max_history: usize) -> MemoryContext {
        let keywords = extract_keywords(current_message);
        let window_start = self.turns.len().saturating_sub(self.memory_window);

        let relevant = if keywords.is_empty() {
            Vec::new()
        } else {
            self.turns[window_start..]
                .iter()
                .rev()
                .filter(|t| t.shares_keyword(&keywords))
                .take(MAX_RELEVANT_TURNS)
                .cloned()
                .collect()
        };

        let recent_start = self.turns.len().saturating_sub(max_history);
        MemoryContext {
            relevant,
            recent: self.turns[recent_start..].to_vec(),
            profile: Some(self.profile.clone()),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            turns: self.turns.clone(),
        }
    }

    /// Rebuild from stored turns, recomputing the keyword table and profile in order.
    pub fn replay(snapshot: SessionSnapshot, memory_window: usize) -> Self {
        let mut session = Self::new(&snapshot.session_id, memory_window);
        for turn in snapshot.turns {
            session.push(turn);
        }
        session
    }
}
