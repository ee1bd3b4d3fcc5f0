//! Persona persistence
//!
//! Stores hold plain [`PersonaRecord`]s keyed by an opaque handle. Every record
//! passes through [`ensure_serializable`] before it is written.

pub mod file;
pub mod sqlite;

use async_trait::async_trait;
use shared_types::{PersonaRecord, PersonaSummary, StorageBackend, StorageConfig};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

pub use file::FilePersonaStore;
pub use sqlite::SqlitePersonaStore;

#[async_trait]
pub trait PersonaStore: Send + Sync {
    /// Persist a record and return its handle
    async fn save(&self, record: &PersonaRecord) -> EngineResult<String>;
    /// `Ok(None)` when no record has this handle
    async fn load(&self, handle: &str) -> EngineResult<Option<PersonaRecord>>;
    /// Newest first
    async fn list(&self) -> EngineResult<Vec<PersonaSummary>>;
    /// True when something was deleted
    async fn delete(&self, handle: &str) -> EngineResult<bool>;
}

pub fn open_store(config: &StorageConfig) -> EngineResult<Arc<dyn PersonaStore>> {
    let store: Arc<dyn PersonaStore> = match config.backend {
        StorageBackend::File => Arc::new(FilePersonaStore::new(&config.persona_dir)?),
        StorageBackend::Sqlite => Arc::new(SqlitePersonaStore::open(&config.sqlite_path)?),
    };
    tracing::info!(backend = ?config.backend, "persona store opened");
    Ok(store)
}

/// Filesystem-safe handle: name slug plus a short random suffix.
pub fn new_handle(name: &str) -> String {
    let slug: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let slug = slug.trim_matches('_');
    let slug = if slug.is_empty() { "persona" } else { slug };
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{slug}_{}", &suffix[..8])
}

/// Handles are file stems; reject anything that could escape the store.
pub fn validate_handle(handle: &str) -> EngineResult<()> {
    if handle.is_empty() || handle.contains(['/', '\\']) || handle.contains("..") {
        return Err(EngineError::Storage(format!("invalid persona handle '{handle}'")));
    }
    Ok(())
}

/// Listing entry; `None` for records without an identity block, which cannot be loaded anyway.
pub fn summary_of(record: &PersonaRecord, handle: &str) -> Option<PersonaSummary> {
    let info = record.basic_info.as_ref()?;
    Some(PersonaSummary {
        name: info.name.clone(),
        object_type: info.object_type.clone(),
        created_at: info.created_at.clone(),
        handle: handle.to_string(),
    })
}

fn humor_is_finite(record: &PersonaRecord) -> bool {
    record.humor_matrix.as_ref().map_or(true, |h| {
        [
            h.warmth_vs_wit,
            h.self_vs_observational,
            h.subtle_vs_expressive,
            h.sarcasm,
            h.absurdity,
            h.wordplay_frequency,
            h.callback_tendency,
            h.humor_density,
        ]
        .iter()
        .all(|v| v.is_finite())
    })
}

/// Identity, summary, flaws and contradictions only
fn minimal_record(record: &PersonaRecord) -> PersonaRecord {
    PersonaRecord {
        basic_info: record.basic_info.clone(),
        trait_summary: record.trait_summary,
        flaws: record.flaws.clone(),
        contradictions: record.contradictions.clone(),
        version: record.version.clone(),
        ..PersonaRecord::default()
    }
}

/// Serialize a record for storage, stripping it to the minimal subset when the full
/// record cannot round-trip through JSON.
pub fn ensure_serializable(record: &PersonaRecord) -> EngineResult<String> {
    if humor_is_finite(record) {
        match serde_json::to_string_pretty(record) {
            Ok(json) => return Ok(json),
            Err(err) => tracing::warn!(error = %err, "persona record not serializable"),
        }
    } else {
        tracing::warn!("persona record has non-finite humor values");
    }

    platform::record_counter("persona_store_stripped_total", 1);
    tracing::warn!("stripping persona record to minimal subset before save");
    Ok(serde_json::to_string_pretty(&minimal_record(record))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::Persona;

    #[test]
    fn test_handle_shape() {
        let handle = new_handle("Sleepy Mug!");
        assert!(handle.starts_with("Sleepy_Mug_"), "{handle}");
        assert!(validate_handle(&handle).is_ok());
        assert!(new_handle("  ").starts_with("persona_"));
        assert!(new_handle("머그컵").starts_with("머그컵_"));
    }

    #[test]
    fn test_rejects_path_like_handles() {
        for bad in ["", "../etc/passwd", "a/b", "a\\b"] {
            assert!(validate_handle(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_non_finite_humor_is_stripped() {
        let mut record = Persona::minimal("Mug").to_record();
        record.flaws = vec!["forgetful".to_string()];
        record.humor_matrix = Some(shared_types::HumorMatrixRecord {
            sarcasm: f64::NAN,
            ..Default::default()
        });

        let json = ensure_serializable(&record).unwrap();
        let stored: PersonaRecord = serde_json::from_str(&json).unwrap();
        assert!(stored.humor_matrix.is_none());
        assert_eq!(stored.flaws, vec!["forgetful".to_string()]);
        assert_eq!(stored.basic_info.unwrap().name, "Mug");
    }

    #[test]
    fn test_clean_record_kept_whole() {
        let mut persona = Persona::minimal("Mug");
        persona.communication_style = "Chatty.".to_string();
        let json = ensure_serializable(&persona.to_record()).unwrap();
        let stored: PersonaRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(stored.communication_style, "Chatty.");
    }
}
