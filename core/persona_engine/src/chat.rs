//! One chat turn: memory context, prompt synthesis, text generation, memory append.

use shared_types::ChatConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::EngineError;
use crate::fallback::canned_apology;
use crate::memory::ConversationMemory;
use crate::oracle::TextGenerator;
use crate::persona::Persona;
use crate::synthesizer::synthesize;

pub struct ChatService {
    config: ChatConfig,
    generator: Arc<dyn TextGenerator>,
    memory: Arc<ConversationMemory>,
}

impl ChatService {
    pub fn new(config: ChatConfig, generator: Arc<dyn TextGenerator>, memory: Arc<ConversationMemory>) -> Self {
        Self {
            config,
            generator,
            memory,
        }
    }

    pub fn memory(&self) -> &Arc<ConversationMemory> {
        &self.memory
    }

    /// Produce the persona's reply and record the turn.
    ///
    /// The session lock is held for the whole turn, so concurrent messages for one
    /// session are answered and recorded in arrival order. Any generation failure,
    /// timeout or empty reply is replaced by the persona's canned apology.
    pub async fn chat_turn(&self, persona: &Persona, session_id: &str, message: &str) -> String {
        let span = platform::session_span(Uuid::new_v4(), "chat_turn", session_id);
        async {
            let handle = self.memory.session(session_id);
            let mut session = handle.lock().await;

            let context = session.relevant_context(message, self.config.max_history);
            let prompt = synthesize(persona, message, &context.recent, &context);

            let reply = match self.generate(&prompt).await {
                Ok(reply) => reply,
                Err(err) => {
                    tracing::warn!(error = %err, "text generation failed, using canned apology");
                    platform::record_counter("persona_oracle_fallback_total", 1);
                    canned_apology(&persona.trait_summary()).to_string()
                }
            };

            session.add_turn(message, &reply);
            platform::record_counter("chat_turns_total", 1);
            reply
        }
        .instrument(span)
        .await
    }

    async fn generate(&self, prompt: &str) -> Result<String, EngineError> {
        let limit = Duration::from_secs(self.config.timeout_secs);
        let reply = tokio::time::timeout(limit, self.generator.generate(prompt, None))
            .await
            .map_err(|_| EngineError::Timeout(self.config.timeout_secs))??;

        let reply = reply.trim();
        if reply.is_empty() {
            return Err(EngineError::MalformedOracleResponse("empty reply".to_string()));
        }
        Ok(reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineResult;
    use crate::oracle::ImageInput;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes a fixed reply and keeps every prompt it was given
    struct Scripted {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, prompt: &str, _image: Option<&ImageInput>) -> EngineResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct Stalled;

    #[async_trait]
    impl TextGenerator for Stalled {
        async fn generate(&self, _prompt: &str, _image: Option<&ImageInput>) -> EngineResult<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("too late".to_string())
        }
    }

    fn service(generator: Arc<dyn TextGenerator>, timeout_secs: u64) -> ChatService {
        let config = ChatConfig {
            timeout_secs,
            ..ChatConfig::default()
        };
        ChatService::new(config, generator, Arc::new(ConversationMemory::default()))
    }

    #[tokio::test]
    async fn test_reply_recorded_and_history_reaches_prompt() {
        let scripted = Arc::new(Scripted {
            reply: "  Hi there!  ".to_string(),
            prompts: Mutex::new(Vec::new()),
        });
        let chat = service(scripted.clone(), 5);
        let persona = Persona::minimal("Mug");

        assert_eq!(chat.chat_turn(&persona, "s1", "hello").await, "Hi there!");
        chat.chat_turn(&persona, "s1", "how are you").await;

        {
            let prompts = scripted.prompts.lock().unwrap();
            assert!(prompts[1].contains("User: hello\nMug: Hi there!"));
        }
        let snapshot = chat.memory().export_session("s1").await.unwrap();
        assert_eq!(snapshot.turns.len(), 2);
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_apology() {
        let chat = service(Arc::new(Stalled), 1);
        let persona = Persona::minimal("Mug");

        let reply = chat.chat_turn(&persona, "s1", "hello").await;
        assert_eq!(reply, canned_apology(&persona.trait_summary()));
        assert_eq!(chat.memory().export_session("s1").await.unwrap().turns[0].response_text, reply);
    }

    #[tokio::test]
    async fn test_empty_reply_is_apology() {
        let scripted = Arc::new(Scripted {
            reply: "   ".to_string(),
            prompts: Mutex::new(Vec::new()),
        });
        let chat = service(scripted, 5);
        let persona = Persona::minimal("Mug");
        assert_eq!(chat.chat_turn(&persona, "s1", "hello").await, canned_apology(&persona.trait_summary()));
    }
}
