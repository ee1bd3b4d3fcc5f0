use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::session::{MemoryContext, SessionMemory, SessionSnapshot, Turn, DEFAULT_MEMORY_WINDOW};

/// Shared handle to one session's memory. Hold the lock for a whole turn to keep turns ordered.
pub type SessionHandle = Arc<Mutex<SessionMemory>>;

/// Conversation memory for every session, keyed by session id.
///
/// Sessions never share state. Each one sits behind its own async mutex, so
/// concurrent turns for the same session are serialized while different
/// sessions proceed independently.
pub struct ConversationMemory {
    sessions: DashMap<String, SessionHandle>,
    memory_window: usize,
}

impl ConversationMemory {
    pub fn new(memory_window: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            memory_window,
        }
    }

    /// Handle for `session_id`, created empty on first use
    pub fn session(&self, session_id: &str) -> SessionHandle {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SessionMemory::new(session_id, self.memory_window))))
            .clone()
    }

    fn existing(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.get(session_id).map(|entry| entry.value().clone())
    }

    pub async fn add_turn(&self, user_text: &str, response_text: &str, session_id: &str) -> Turn {
        let handle = self.session(session_id);
        let mut session = handle.lock().await;
        session.add_turn(user_text, response_text).clone()
    }

    /// Context for a message; empty for a session that has never been seen.
    pub async fn relevant_context(&self, current_message: &str, session_id: &str, max_history: usize) -> MemoryContext {
        match self.existing(session_id) {
            Some(handle) => handle.lock().await.relevant_context(current_message, max_history),
            None => MemoryContext::default(),
        }
    }

    pub async fn export_session(&self, session_id: &str) -> Option<SessionSnapshot> {
        let handle = self.existing(session_id)?;
        let session = handle.lock().await;
        Some(session.snapshot())
    }

    /// Replace a session with the replayed contents of `snapshot`.
    pub fn import_session(&self, snapshot: SessionSnapshot) {
        let session_id = snapshot.session_id.clone();
        let session = SessionMemory::replay(snapshot, self.memory_window);
        tracing::info!(session = %session_id, turns = session.turns().len(), "session imported");
        self.sessions.insert(session_id, Arc::new(Mutex::new(session)));
    }

    pub fn delete_session(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn session_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::RelationshipStage;

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let memory = ConversationMemory::default();
        memory.add_turn("I love pizza", "same", "A").await;
        memory.add_turn("hello", "hi", "B").await;
        let before = memory.export_session("B").await.unwrap();

        memory.add_turn("pizza again", "yum", "A").await;
        memory.add_turn("more pizza", "wow", "A").await;

        let after = memory.export_session("B").await.unwrap();
        assert_eq!(before, after);

        let handle = memory.session("B");
        let b = handle.lock().await;
        assert_eq!(b.profile().message_count, 1);
        assert!(!b.keyword_counts().contains_key("pizza"));
    }

    #[tokio::test]
    async fn test_unknown_session_context_is_empty() {
        let memory = ConversationMemory::default();
        let context = memory.relevant_context("hello", "nobody", 3).await;
        assert_eq!(context, MemoryContext::default());
        assert!(memory.session_ids().is_empty());
    }

    #[tokio::test]
    async fn test_export_import_delete() {
        let memory = ConversationMemory::default();
        for text in ["one", "two", "three", "four"] {
            memory.add_turn(text, "ok", "s1").await;
        }
        let snapshot = memory.export_session("s1").await.unwrap();

        let restored = ConversationMemory::default();
        restored.import_session(snapshot);
        let context = restored.relevant_context("anything", "s1", 3).await;
        let profile = context.profile.unwrap();
        assert_eq!(profile.message_count, 4);
        assert_eq!(profile.relationship_stage, RelationshipStage::GettingAcquainted);

        assert!(restored.delete_session("s1"));
        assert!(!restored.delete_session("s1"));
        assert!(restored.export_session("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_turns_same_session_all_recorded() {
        let memory = Arc::new(ConversationMemory::default());
        let mut tasks = Vec::new();
        for i in 0..16 {
            let memory = Arc::clone(&memory);
            tasks.push(tokio::spawn(async move {
                memory.add_turn(&format!("message {i}"), "ok", "shared").await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let snapshot = memory.export_session("shared").await.unwrap();
        assert_eq!(snapshot.turns.len(), 16);
        let handle = memory.session("shared");
        assert_eq!(handle.lock().await.profile().message_count, 16);
    }
}
