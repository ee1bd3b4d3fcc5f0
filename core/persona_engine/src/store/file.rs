use async_trait::async_trait;
use shared_types::{PersonaRecord, PersonaSummary};
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{ensure_serializable, new_handle, summary_of, validate_handle, PersonaStore};
use crate::error::EngineResult;

/// One pretty-printed JSON file per persona; the handle is the file stem.
pub struct FilePersonaStore {
    dir: PathBuf,
}

impl FilePersonaStore {
    pub fn new(dir: impl AsRef<Path>) -> EngineResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, handle: &str) -> EngineResult<PathBuf> {
        validate_handle(handle)?;
        Ok(self.dir.join(format!("{handle}.json")))
    }
}

#[async_trait]
impl PersonaStore for FilePersonaStore {
    async fn save(&self, record: &PersonaRecord) -> EngineResult<String> {
        let name = record.basic_info.as_ref().map(|b| b.name.as_str()).unwrap_or_default();
        let handle = new_handle(name);
        let json = ensure_serializable(record)?;
        fs::write(self.path_for(&handle)?, json).await?;
        tracing::info!(handle = %handle, "persona saved");
        Ok(handle)
    }

    async fn load(&self, handle: &str) -> EngineResult<Option<PersonaRecord>> {
        let path = self.path_for(handle)?;
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn list(&self) -> EngineResult<Vec<PersonaSummary>> {
        let mut summaries = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(handle) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };

            let parsed = fs::read_to_string(&path)
                .await
                .map_err(crate::error::EngineError::from)
                .and_then(|c| serde_json::from_str::<PersonaRecord>(&c).map_err(Into::into));
            match parsed {
                Ok(record) => summaries.extend(summary_of(&record, &handle)),
                Err(err) => tracing::warn!(file = %path.display(), error = %err, "skipping unreadable persona file"),
            }
        }
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.handle.cmp(&b.handle)));
        Ok(summaries)
    }

    async fn delete(&self, handle: &str) -> EngineResult<bool> {
        match fs::remove_file(self.path_for(handle)?).await {
            Ok(()) => {
                tracing::info!(handle = %handle, "persona deleted");
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
