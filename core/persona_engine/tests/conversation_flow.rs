use async_trait::async_trait;
use persona_engine::memory::RelationshipStage;
use persona_engine::{
    synthesize, ChatService, ConversationMemory, EngineError, EngineResult, ImageInput, MemoryContext, Persona,
    TextGenerator,
};
use shared_types::{ChatConfig, PersonaRecord};
use std::sync::{Arc, Mutex};

/// Text oracle that records prompts and replies with a counter
#[derive(Default)]
struct Recorder {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextGenerator for Recorder {
    async fn generate(&self, prompt: &str, _image: Option<&ImageInput>) -> EngineResult<String> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        Ok(format!("reply {}", prompts.len()))
    }
}

struct Offline;

#[async_trait]
impl TextGenerator for Offline {
    async fn generate(&self, _prompt: &str, _image: Option<&ImageInput>) -> EngineResult<String> {
        Err(EngineError::OracleUnavailable("connection refused".to_string()))
    }
}

#[test]
fn test_minimal_record_still_produces_prompt() {
    let record: PersonaRecord = serde_json::from_str(r#"{"identity": {"name": "X"}}"#).unwrap();
    let persona = Persona::from_record(record).unwrap();

    let prompt = synthesize(&persona, "hello", &[], &MemoryContext::default());
    assert!(!prompt.is_empty());
    assert!(prompt.contains("hello"));
}

#[tokio::test]
async fn test_relationship_stage_moves_on_fourth_turn() {
    let memory = ConversationMemory::default();
    let mut stages = Vec::new();
    for text in ["hi", "how are you", "nice weather", "tell me something"] {
        memory.add_turn(text, "ok", "s1").await;
        let profile = memory.relevant_context("", "s1", 3).await.profile.unwrap();
        stages.push(profile.relationship_stage);
    }

    assert_eq!(stages[2], RelationshipStage::FirstMeeting);
    assert_eq!(stages[3], RelationshipStage::GettingAcquainted);
}

#[tokio::test]
async fn test_rolling_profile_follows_incremental_mean() {
    let memory = ConversationMemory::default();
    let texts = ["a short one", "something a little longer than that", "ok"];
    let mut expected = 0.0;
    for (i, text) in texts.iter().enumerate() {
        memory.add_turn(text, "ok", "s1").await;
        expected += (text.chars().count() as f64 - expected) / (i + 1) as f64;

        let profile = memory.relevant_context("", "s1", 0).await.profile.unwrap();
        assert_eq!(profile.message_count, (i + 1) as u64);
        assert_eq!(profile.average_length, expected);
    }
}

#[tokio::test]
async fn test_remembered_topic_reaches_later_prompt() {
    let recorder = Arc::new(Recorder::default());
    let config = ChatConfig {
        max_history: 1,
        ..ChatConfig::default()
    };
    let chat = ChatService::new(config, recorder.clone(), Arc::new(ConversationMemory::default()));
    let persona = Persona::minimal("Kettle");

    chat.chat_turn(&persona, "s1", "my cat knocked over the plant").await;
    chat.chat_turn(&persona, "s1", "work was boring today").await;
    chat.chat_turn(&persona, "s1", "the cat is asleep now").await;

    let prompts = recorder.prompts.lock().unwrap();
    let last = &prompts[2];
    assert!(last.contains("What you remember"));
    assert!(last.contains("my cat knocked over the plant"));
    assert!(last.contains("User: work was boring today\nKettle: reply 2"));
    assert!(!last.contains("User: my cat knocked"));
}

#[tokio::test]
async fn test_offline_oracle_degrades_to_apology_and_keeps_session_separate() {
    let memory = Arc::new(ConversationMemory::default());
    let chat = ChatService::new(ChatConfig::default(), Arc::new(Offline), Arc::clone(&memory));
    let persona = Persona::minimal("Kettle");

    let reply = chat.chat_turn(&persona, "A", "hello there").await;
    assert!(!reply.is_empty());
    memory.add_turn("unrelated", "ok", "B").await;
    let before = memory.export_session("B").await.unwrap();

    chat.chat_turn(&persona, "A", "are you there?").await;
    assert_eq!(memory.export_session("B").await.unwrap(), before);
    assert_eq!(memory.export_session("A").await.unwrap().turns.len(), 2);
}
