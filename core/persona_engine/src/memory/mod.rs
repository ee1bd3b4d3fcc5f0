//! Conversation Memory
//!
//! Append-only turn log per session with keyword/sentiment tags and a rolling
//! user profile, plus relevant-context extraction for the prompt synthesizer.

pub mod conversation;
pub mod keywords;
pub mod session;

pub use conversation::{ConversationMemory, SessionHandle};
pub use keywords::{detect_sentiment, extract_keywords, Sentiment};
pub use session::{
    MemoryContext, RelationshipStage, SessionMemory, SessionSnapshot, Turn, UserProfile,
    DEFAULT_MEMORY_WINDOW,
};
