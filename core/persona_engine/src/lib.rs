//! Object persona engine
//!
//! Turns an analyzed photo of an everyday object plus a little user context into a
//! structured personality, and turns that personality plus conversation memory into
//! the prompt for each chat turn.

pub mod adapters;
pub mod archetype;
pub mod chat;
pub mod config_service;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod humor;
pub mod memory;
pub mod narrative;
pub mod oracle;
pub mod persona;
pub mod store;
pub mod synthesizer;
pub mod traits;

pub use chat::ChatService;
pub use error::{EngineError, EngineResult};
pub use generator::{PersonaGenerator, UserContext};
pub use humor::{HumorMatrix, HumorTemplate};
pub use memory::{ConversationMemory, MemoryContext, Turn};
pub use oracle::{ImageAnalyzer, ImageInput, OpenAiCompatClient, TextGenerator};
pub use persona::{Persona, SummaryDimension};
pub use store::{open_store, PersonaStore};
pub use synthesizer::synthesize;
pub use traits::TraitVector;
