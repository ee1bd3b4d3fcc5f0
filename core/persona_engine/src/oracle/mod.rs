//! External oracles: image analysis and text generation.
//!
//! The engine only depends on the two traits here. `http` holds the
//! OpenAI-compatible client used in production.

pub mod analysis;
pub mod http;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

pub use analysis::{parse_analysis, ParsedAnalysis, ANALYSIS_PROMPT};
pub use http::OpenAiCompatClient;

/// Raw image bytes plus their MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageInput {
    pub fn new(bytes: Vec<u8>, mime_type: &str) -> Self {
        Self {
            bytes,
            mime_type: mime_type.to_string(),
        }
    }

    pub fn from_path(path: &Path) -> EngineResult<Self> {
        let bytes = std::fs::read(path)?;
        let mime_type = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "image/jpeg",
        };
        Ok(Self::new(bytes, mime_type))
    }

    /// `data:` URL with base64 payload, as accepted by vision chat endpoints
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, image: Option<&ImageInput>) -> EngineResult<String>;
}

/// Returns the oracle's raw description text; parsing and defaulting happen in [`analysis`].
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn analyze(&self, image: &ImageInput) -> EngineResult<String>;
}

/// Stand-in used when no provider is configured. Every call fails, so callers take their fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

#[async_trait]
impl TextGenerator for Unconfigured {
    async fn generate(&self, _prompt: &str, _image: Option<&ImageInput>) -> EngineResult<String> {
        Err(EngineError::OracleUnavailable("no LLM provider configured".to_string()))
    }
}

#[async_trait]
impl ImageAnalyzer for Unconfigured {
    async fn analyze(&self, _image: &ImageInput) -> EngineResult<String> {
        Err(EngineError::OracleUnavailable("no LLM provider configured".to_string()))
    }
}
