use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use shared_types::{PersonaRecord, PersonaSummary};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::task;

use super::{ensure_serializable, new_handle, summary_of, PersonaStore};
use crate::error::{EngineError, EngineResult};

/// Records stored as JSON text in a single `personas` table.
#[derive(Clone)]
pub struct SqlitePersonaStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePersonaStore {
    pub fn open(db_path: &str) -> EngineResult<Self> {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::init(Connection::open(db_path)?)
    }

    pub fn in_memory() -> EngineResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> EngineResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS personas (
                handle TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                object_type TEXT NOT NULL,
                created_at TEXT NOT NULL,
                record_json TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> EngineResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> EngineResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| EngineError::Storage(format!("connection lock poisoned: {e}")))?;
            f(&conn)
        })
        .await
        .map_err(|e| EngineError::Storage(format!("storage task failed: {e}")))?
    }
}

#[async_trait]
impl PersonaStore for SqlitePersonaStore {
    async fn save(&self, record: &PersonaRecord) -> EngineResult<String> {
        let json = ensure_serializable(record)?;
        let info = record.basic_info.clone().unwrap_or_default();
        let handle = new_handle(&info.name);

        let row_handle = handle.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO personas (handle, name, object_type, created_at, record_json)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![row_handle, info.name, info.object_type, info.created_at, json],
            )?;
            Ok(())
        })
        .await?;

        tracing::info!(handle = %handle, "persona saved");
        Ok(handle)
    }

    async fn load(&self, handle: &str) -> EngineResult<Option<PersonaRecord>> {
        let handle = handle.to_string();
        let json: Option<String> = self
            .with_conn(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT record_json FROM personas WHERE handle = ?1",
                        params![handle],
                        |row| row.get(0),
                    )
                    .optional()?)
            })
            .await?;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> EngineResult<Vec<PersonaSummary>> {
        let rows: Vec<(String, String)> = self
            .with_conn(|conn| {
                let mut stmt = conn.prepare("SELECT handle, record_json FROM personas")?;
                let rows = stmt
                    .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for (handle, json) in rows {
            match serde_json::from_str::<PersonaRecord>(&json) {
                Ok(record) => summaries.extend(summary_of(&record, &handle)),
                Err(err) => tracing::warn!(handle = %handle, error = %err, "skipping unreadable persona row"),
            }
        }
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.handle.cmp(&b.handle)));
        Ok(summaries)
    }

    async fn delete(&self, handle: &str) -> EngineResult<bool> {
        let handle = handle.to_string();
        let removed = self
            .with_conn(move |conn| Ok(conn.execute("DELETE FROM personas WHERE handle = ?1", params![handle])?))
            .await?;
        Ok(removed > 0)
    }
}
