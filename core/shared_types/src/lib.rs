use serde::{Deserialize, Serialize};

// Persisted persona record contract and oracle payloads
pub mod persona;
pub use persona::*;

/// Version tag written into every persisted persona record.
pub const RECORD_VERSION: &str = "2.0";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_name: String,
    /// Model used for image analysis. Falls back to `model_name` when absent.
    #[serde(default)]
    pub vision_model: Option<String>,
    pub max_input_tokens: Option<u32>,
}

impl ProviderConfig {
    pub fn vision_model(&self) -> &str {
        self.vision_model.as_deref().unwrap_or(&self.model_name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LLMConfig {
    pub default_provider: String,
    pub openrouter: Option<ProviderConfig>,
    pub gemini: Option<ProviderConfig>,
    pub openai: Option<ProviderConfig>,
    pub ollama: Option<ProviderConfig>,
    pub lmstudio: Option<ProviderConfig>,
}

impl LLMConfig {
    /// Provider section selected by `default_provider`, if configured.
    pub fn active_provider(&self) -> Option<&ProviderConfig> {
        match self.default_provider.as_str() {
            "openrouter" => self.openrouter.as_ref(),
            "gemini" => self.gemini.as_ref(),
            "openai" => self.openai.as_ref(),
            "ollama" => self.ollama.as_ref(),
            "lmstudio" => self.lmstudio.as_ref(),
            _ => None,
        }
    }
}

fn default_max_history() -> usize {
    3
}

fn default_memory_window() -> usize {
    20
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatConfig {
    /// Trailing turns included verbatim in every prompt.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// How many recent turns are scanned for keyword overlap.
    #[serde(default = "default_memory_window")]
    pub memory_window: usize,
    /// Hard limit on a single text-generation call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            memory_window: default_memory_window(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_jitter() -> i32 {
    5
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GenerationConfig {
    /// Fixed RNG seed. When omitted every generation draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Half-width of the final per-variable jitter pass.
    #[serde(default = "default_jitter")]
    pub jitter: i32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            jitter: default_jitter(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    File,
    Sqlite,
}

fn default_persona_dir() -> String {
    "./data/personas".to_string()
}

fn default_sqlite_path() -> String {
    "./data/personas.db".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_persona_dir")]
    pub persona_dir: String,
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            persona_dir: default_persona_dir(),
            sqlite_path: default_sqlite_path(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TelemetryConfig {
    /// Prometheus listener address, e.g. "127.0.0.1:9464". Metrics stay disabled when unset.
    #[serde(default)]
    pub metrics_bind: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub llm: LLMConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_provider_selection() {
        let llm = LLMConfig {
            default_provider: "gemini".to_string(),
            openrouter: None,
            gemini: Some(ProviderConfig {
                api_key: Some("k".to_string()),
                base_url: None,
                model_name: "gemini-2.0-flash".to_string(),
                vision_model: None,
                max_input_tokens: None,
            }),
            openai: None,
            ollama: None,
            lmstudio: None,
        };

        let provider = llm.active_provider().expect("gemini configured");
        assert_eq!(provider.vision_model(), "gemini-2.0-flash");

        let unknown = LLMConfig {
            default_provider: "grok".to_string(),
            ..llm
        };
        assert!(unknown.active_provider().is_none());
    }

    #[test]
    fn test_sections_default_when_missing() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "llm": { "default_provider": "openai" }
        }))
        .unwrap();

        assert_eq!(config.chat.max_history, 3);
        assert_eq!(config.chat.memory_window, 20);
        assert_eq!(config.generation.jitter, 5);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.telemetry.metrics_bind.is_none());
    }
}
